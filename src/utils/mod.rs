pub mod app_paths;
