mod auth;
mod blog;
mod db;
mod factory;
