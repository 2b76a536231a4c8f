//! 工具函数模块
//!
//! 金额精度转换，以及由价格和余额派生的计算

pub mod amount_converter;
pub mod price_calculator;

pub use amount_converter::{AmountConverter, NATIVE_DECIMALS};
pub use price_calculator::PriceCalculator;
