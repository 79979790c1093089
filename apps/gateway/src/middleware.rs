//! # ミドルウェア
//!
//! Gateway 用のミドルウェアを提供する。

mod origin;

pub use origin::{OriginState, enforce_origin};
