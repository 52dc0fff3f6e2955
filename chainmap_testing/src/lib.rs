#![allow(dead_code)]
#![allow(unused_imports)]

pub mod stat;
pub use stat::*;

pub mod generate;
pub use generate::*;

pub mod map;
pub use map::*;

pub mod hasher;
pub use hasher::*;
