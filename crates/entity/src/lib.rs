mod entities;
pub use entities::*;

pub mod prelude {
    pub use super::entities::prelude::*;
}
