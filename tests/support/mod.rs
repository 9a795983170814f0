pub mod cardioform_env;
pub mod one_shot_server;
