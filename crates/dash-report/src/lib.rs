//! Static HTML dashboard rendering.
//!
//! Consumes the intermediate summary files written by the preprocess stage
//! (never the raw rows) and produces one self-contained `index.html` with
//! embedded data, styles and chart script.

pub mod render;
