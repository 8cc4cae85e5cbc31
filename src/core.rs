pub mod capability;
pub mod fallback;
pub mod history;
pub mod locale;
pub mod service;
pub mod session;
