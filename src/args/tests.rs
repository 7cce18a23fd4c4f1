use super::parsers::parse_bool_env;
use super::test_support::parse_test_args;
use super::*;
use crate::error::{AppError, AppResult};
use std::time::Duration;
