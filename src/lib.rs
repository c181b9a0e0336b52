#[allow(non_snake_case)]
pub mod Presentation;
#[allow(non_snake_case)]
pub mod Rates;
#[allow(non_snake_case)]
pub mod Utils;
pub mod cli;
pub mod settings;
