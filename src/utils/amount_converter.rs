//! 金额转换工具
//!
//! 链上金额以最小单位的十进制字符串传输，这里负责在原始金额和实际金额之间转换，
//! 全程使用 `Decimal`，不经过浮点数。

use crate::error::FetchError;
use ethers::types::U256;
use num_traits::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

pub const NATIVE_DECIMALS: u32 = 18;

/// 金额转换工具
pub struct AmountConverter;

impl AmountConverter {
    /// 将原始金额字符串转换为实际金额
    ///
    /// # 参数
    /// * `raw_amount` - 最小单位的十进制字符串（如 wei）
    /// * `decimals` - 代币精度
    pub fn raw_to_decimal(raw_amount: &str, decimals: u32) -> Result<Decimal, FetchError> {
        let raw = raw_amount.trim();
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(FetchError::decode(format!("无效的金额 '{}'", raw)));
        }

        let value = U256::from_dec_str(raw)
            .map_err(|e| FetchError::decode(format!("无效的金额 '{}': {}", raw, e)))?;

        if value.is_zero() {
            return Ok(Decimal::ZERO);
        }

        if value.bits() > 96 {
            return Err(FetchError::decode(format!("金额超出可表示范围: {}", raw)));
        }

        Decimal::try_from_i128_with_scale(value.as_u128() as i128, decimals)
            .map(|d| d.normalize())
            .map_err(|e| FetchError::decode(format!("金额转换失败 '{}': {}", raw, e)))
    }

    /// 将实际金额转换为最小单位；小数位超过精度或为负时返回 `None`
    pub fn decimal_to_raw(amount: Decimal, decimals: u32) -> Option<U256> {
        if amount.is_sign_negative() {
            return None;
        }

        let multiplier = Decimal::from(10_u64.checked_pow(decimals)?);
        let raw = amount.checked_mul(multiplier)?;
        if !raw.fract().is_zero() {
            return None;
        }

        raw.to_u128().map(U256::from)
    }

    /// 固定小数位格式化（四舍五入）
    pub fn format_fixed(amount: Decimal, precision: u32) -> String {
        let rounded = amount.round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero);
        format!("{:.precision$}", rounded, precision = precision as usize)
    }

    pub fn to_f64(amount: Decimal) -> f64 {
        amount.to_f64().unwrap_or(0.0)
    }
}
