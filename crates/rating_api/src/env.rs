use mkenv::{error::ConfigInitError, prelude::*};
use once_cell::sync::OnceCell;
use ratings_lib::{DbEnv, LibEnv};

mkenv::make_config! {
    pub struct ApiEnv {
        pub db_env: { DbEnv },

        pub port: {
            var_name: "RATINGS_API_PORT",
            layers: [
                parsed_from_str<u16>(),
                or_default_val(|| 8000),
            ],
            description: "The port used to expose the API",
            default_val_fmt: "8000",
        },

        pub host: {
            var_name: "RATINGS_API_HOST",
            layers: [
                or_default_val(|| "http://localhost:8000".to_owned()),
            ],
            description: "The hostname of the server where the API is running (e.g. https://ratings.example.org)",
            default_val_fmt: "http://localhost:8000",
        },
    }
}

static ENV: OnceCell<ApiEnv> = OnceCell::new();

pub fn env() -> &'static ApiEnv {
    ENV.get().unwrap()
}

pub fn init_env() -> anyhow::Result<()> {
    fn map_err(err: ConfigInitError<'_>) -> anyhow::Error {
        anyhow::anyhow!("{err}")
    }

    let env = ApiEnv::define();
    let lib_env = LibEnv::define();
    env.try_init().map_err(map_err)?;
    lib_env.try_init().map_err(map_err)?;
    ratings_lib::init_env(lib_env);
    let _ = ENV.set(env);

    Ok(())
}
