//! Functionality for processing CC-CEDICT data into CBR's dictfile.

pub mod cedict;
pub mod dictfile;
