pub mod core {
    pub mod config;
    pub mod error;
    pub mod routes;
    pub mod startup;
    pub mod state;
    pub mod tracing_init;
}

pub mod handlers {
    pub mod fallback;
    pub mod health;
    pub mod users;
}

pub mod models {
    pub mod payload;
    pub mod user;
}

pub mod security {
    pub mod auth_gate;
    pub mod credentials;
}

pub mod services {
    pub mod user_service;
}

pub mod stores {
    pub mod user_store;
}

pub mod utils {
    pub mod password;
}
