pub use super::auth_tokens::Entity as AuthTokens;
pub use super::module_instance_professors::Entity as ModuleInstanceProfessors;
pub use super::module_instances::Entity as ModuleInstances;
pub use super::modules::Entity as Modules;
pub use super::professors::Entity as Professors;
pub use super::ratings::Entity as Ratings;
pub use super::users::Entity as Users;
