//! Data layer for the interactive report tables
//!
//! Tables hold rendered cell text; the filter, sorter and exporter operate on
//! that text and the controller ties them to one table instance.

// Core data modules
pub mod datatable;
pub mod type_inference;

// Operations
pub mod data_exporter;
pub mod datavalue_compare;
pub mod search_filter;
pub mod sorter;

// Orchestration
pub mod document;
pub mod table_controller;

// Data source modules
pub mod csv_loader;
