//! Validation utilities for the AgriTwin advisory platform
//!
//! Includes India-specific validations for postal codes and phone numbers.

// ============================================================================
// Agronomy Validations
// ============================================================================

/// Validate a farm area in hectares
pub fn validate_area_hectares(area: f64) -> Result<(), &'static str> {
    if !area.is_finite() {
        return Err("Area must be a finite number");
    }
    if area <= 0.0 {
        return Err("Area must be positive");
    }
    if area > 10_000.0 {
        return Err("Area exceeds the supported plot size");
    }
    Ok(())
}

/// Validate a soil pH reading is physically plausible
pub fn validate_soil_ph(ph: f64) -> Result<(), &'static str> {
    if !(0.0..=14.0).contains(&ph) {
        return Err("Soil pH must be between 0 and 14");
    }
    Ok(())
}

/// Validate a crop name is usable as a categorical level
pub fn validate_crop_name(crop: &str) -> Result<(), &'static str> {
    if crop.trim().is_empty() {
        return Err("Crop name cannot be empty");
    }
    if crop.len() > 64 {
        return Err("Crop name too long");
    }
    Ok(())
}

// ============================================================================
// India-Specific Validations
// ============================================================================

/// Validate an Indian postal code (PIN): 6 digits, first digit 1-9
pub fn validate_pincode(pincode: &str) -> Result<(), &'static str> {
    if pincode.len() != 6 {
        return Err("Pincode must be exactly 6 digits");
    }
    if !pincode.chars().all(|c| c.is_ascii_digit()) {
        return Err("Pincode must contain only digits");
    }
    if pincode.starts_with('0') {
        return Err("Pincode cannot start with 0");
    }
    Ok(())
}

/// Validate an Indian mobile number
/// Accepts: 9812345678, 09812345678, +919812345678
pub fn validate_indian_phone(phone: &str) -> Result<(), &'static str> {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    // 10-digit mobile starting 6-9
    if digits.len() == 10 && digits.starts_with(['6', '7', '8', '9']) {
        return Ok(());
    }
    // Leading trunk 0
    if digits.len() == 11 && digits.starts_with('0') && digits[1..].starts_with(['6', '7', '8', '9'])
    {
        return Ok(());
    }
    // Country code 91
    if digits.len() == 12 && digits.starts_with("91") && digits[2..].starts_with(['6', '7', '8', '9'])
    {
        return Ok(());
    }
    Err("Invalid Indian phone number")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn well_formed_pincodes_validate(pincode in "[1-9][0-9]{5}") {
            prop_assert!(validate_pincode(&pincode).is_ok());
        }

        #[test]
        fn positive_areas_validate(area in 0.0001f64..10_000.0) {
            prop_assert!(validate_area_hectares(area).is_ok());
        }
    }

    #[test]
    fn pincode_rules() {
        assert!(validate_pincode("110001").is_ok());
        assert!(validate_pincode("560034").is_ok());
        assert!(validate_pincode("011001").is_err());
        assert!(validate_pincode("11001").is_err());
        assert!(validate_pincode("1100011").is_err());
        assert!(validate_pincode("11000a").is_err());
    }

    #[test]
    fn phone_rules() {
        assert!(validate_indian_phone("9812345678").is_ok());
        assert!(validate_indian_phone("09812345678").is_ok());
        assert!(validate_indian_phone("+91 98123 45678").is_ok());
        assert!(validate_indian_phone("5812345678").is_err());
        assert!(validate_indian_phone("98123").is_err());
    }

    #[test]
    fn area_rules() {
        assert!(validate_area_hectares(1.5).is_ok());
        assert!(validate_area_hectares(0.0).is_err());
        assert!(validate_area_hectares(-2.0).is_err());
        assert!(validate_area_hectares(f64::NAN).is_err());
    }

    #[test]
    fn ph_rules() {
        assert!(validate_soil_ph(6.5).is_ok());
        assert!(validate_soil_ph(0.0).is_ok());
        assert!(validate_soil_ph(14.0).is_ok());
        assert!(validate_soil_ph(14.1).is_err());
        assert!(validate_soil_ph(-0.1).is_err());
    }
}
