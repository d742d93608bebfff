// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
#![allow(non_snake_case)]
pub mod Utils;
pub mod config;
pub mod errors;
pub mod graph;
pub mod symbolic;
