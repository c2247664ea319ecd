pub mod app_state_builder;
pub mod fixtures;
pub mod in_memory_repository;
pub mod recording_notifier;
pub mod stubs;

pub fn load_test_env() {
    dotenvy::from_filename(".env.test").ok();
}
