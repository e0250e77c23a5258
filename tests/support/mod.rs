#![allow(dead_code)]

pub mod betaboard_env;
pub mod fixtures;
