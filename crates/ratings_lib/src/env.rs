use once_cell::sync::OnceCell;

mkenv::make_config! {
    /// The environment used to set up a connection to the SQL database.
    pub struct DbUrlEnv {
        /// The database URL.
        pub db_url: {
            var_name: "DATABASE_URL",
            description: "The URL to the SQL database",
        }
    }
}

mkenv::make_config! {
    /// The environment used to set up a connection with the Redis database.
    pub struct RedisUrlEnv {
        /// The URL to the Redis database.
        pub redis_url: {
            var_name: "REDIS_URL",
            description: "The URL to the Redis database",
        }
    }
}

mkenv::make_config! {
    /// The environment used to set up a connection to the databases of the API.
    pub struct DbEnv {
        /// The environment for the SQL database.
        pub db_url: { DbUrlEnv },
        /// The environment for the Redis database.
        pub redis_url: { RedisUrlEnv },
    }
}

mkenv::make_config! {
    /// The environment used by this crate.
    pub struct LibEnv {
        /// The time-to-live of the cached read responses.
        pub cache_ttl: {
            var_name: "RATINGS_API_CACHE_TTL",
            layers: [
                parsed_from_str<u64>(),
                or_default_val(|| 900),
            ],
            description: "The TTL (time-to-live) of the cached list and average responses, in seconds",
            default_val_fmt: "15 minutes",
        },

        /// The time-to-live of the issued authentication tokens.
        pub token_ttl: {
            var_name: "RATINGS_API_TOKEN_TTL",
            layers: [
                parsed_from_str<i64>(),
                or_default_val(|| 180 * 24 * 3600),
            ],
            description: "The TTL (time-to-live) of an authentication token, in seconds",
            default_val_fmt: "180 days",
        },
    }
}

static ENV: OnceCell<LibEnv> = OnceCell::new();

/// Initializes the provided library environment as global.
///
/// If this function has already been called, the provided environment will be ignored.
pub fn init_env(env: LibEnv) {
    let _ = ENV.set(env);
}

/// Returns a static reference to the global library environment.
///
/// **Caution**: To use this function, the [`init_env()`] function must have been called at the start
/// of the program.
pub fn env() -> &'static LibEnv {
    ENV.get().unwrap()
}
