pub mod mixer_api;
