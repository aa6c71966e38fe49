//! Farmer profile store
//!
//! JSON-file-backed store of farmer profiles. One profile at a time is
//! active; forecasts and what-if runs start from it. Mutations rewrite the
//! whole file, serialized behind a mutex.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Utc;
use serde::Deserialize;
use shared::validation::{
    validate_area_hectares, validate_indian_phone, validate_pincode,
};
use shared::FarmerProfile;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Profile store
pub struct ProfileStore {
    path: PathBuf,
    profiles: Mutex<Vec<FarmerProfile>>,
}

/// Input for creating a profile
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProfileInput {
    pub name: String,
    pub phone: String,
    pub pincode: String,
    pub state: Option<String>,
    pub district: Option<String>,
    pub crop: Option<String>,
    pub season: Option<String>,
    pub area_hectares: f64,
    pub sms_alerts: Option<bool>,
}

/// Input for updating a profile; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfileInput {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub pincode: Option<String>,
    pub state: Option<String>,
    pub district: Option<String>,
    pub crop: Option<String>,
    pub season: Option<String>,
    pub area_hectares: Option<f64>,
    pub sms_alerts: Option<bool>,
}

impl ProfileStore {
    /// Open the store, loading any existing profile file. A missing file is
    /// an empty store, not an error.
    pub fn open(path: impl Into<PathBuf>) -> AppResult<Self> {
        let path = path.into();
        let profiles = match std::fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path,
            profiles: Mutex::new(profiles),
        })
    }

    pub fn list(&self) -> Vec<FarmerProfile> {
        self.lock().clone()
    }

    pub fn get(&self, id: Uuid) -> AppResult<FarmerProfile> {
        self.lock()
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Profile".to_string()))
    }

    /// The currently active profile, if any.
    pub fn active(&self) -> Option<FarmerProfile> {
        self.lock().iter().find(|p| p.is_active).cloned()
    }

    /// Create a profile. The first profile in the store becomes active.
    pub fn create(&self, input: CreateProfileInput) -> AppResult<FarmerProfile> {
        validate_input(&input)?;

        let mut profiles = self.lock();
        let profile = FarmerProfile {
            id: Uuid::new_v4(),
            name: input.name,
            phone: input.phone,
            pincode: input.pincode,
            state: input.state,
            district: input.district,
            crop: input.crop,
            season: input.season,
            area_hectares: input.area_hectares,
            sms_alerts: input.sms_alerts.unwrap_or(false),
            is_active: profiles.is_empty(),
            created_at: Utc::now(),
        };

        profiles.push(profile.clone());
        self.persist(&profiles)?;
        tracing::info!(id = %profile.id, name = %profile.name, "profile created");
        Ok(profile)
    }

    pub fn update(&self, id: Uuid, input: UpdateProfileInput) -> AppResult<FarmerProfile> {
        if let Some(pincode) = &input.pincode {
            validate_pincode(pincode).map_err(|msg| field_error("pincode", msg))?;
        }
        if let Some(phone) = &input.phone {
            validate_indian_phone(phone).map_err(|msg| field_error("phone", msg))?;
        }
        if let Some(area) = input.area_hectares {
            validate_area_hectares(area).map_err(|msg| field_error("area_hectares", msg))?;
        }

        let mut profiles = self.lock();
        let profile = profiles
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::NotFound("Profile".to_string()))?;

        if let Some(name) = input.name {
            profile.name = name;
        }
        if let Some(phone) = input.phone {
            profile.phone = phone;
        }
        if let Some(pincode) = input.pincode {
            profile.pincode = pincode;
        }
        if let Some(state) = input.state {
            profile.state = Some(state);
        }
        if let Some(district) = input.district {
            profile.district = Some(district);
        }
        if let Some(crop) = input.crop {
            profile.crop = Some(crop);
        }
        if let Some(season) = input.season {
            profile.season = Some(season);
        }
        if let Some(area) = input.area_hectares {
            profile.area_hectares = area;
        }
        if let Some(sms) = input.sms_alerts {
            profile.sms_alerts = sms;
        }

        let updated = profile.clone();
        self.persist(&profiles)?;
        Ok(updated)
    }

    /// Make `id` the single active profile.
    pub fn activate(&self, id: Uuid) -> AppResult<FarmerProfile> {
        let mut profiles = self.lock();
        if !profiles.iter().any(|p| p.id == id) {
            return Err(AppError::NotFound("Profile".to_string()));
        }

        for profile in profiles.iter_mut() {
            profile.is_active = profile.id == id;
        }

        self.persist(&profiles)?;
        let activated = profiles
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Profile".to_string()))?;
        tracing::info!(id = %activated.id, "profile activated");
        Ok(activated)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<FarmerProfile>> {
        self.profiles.lock().expect("profile store lock poisoned")
    }

    fn persist(&self, profiles: &[FarmerProfile]) -> AppResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| *p != Path::new("")) {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(profiles)?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}

fn validate_input(input: &CreateProfileInput) -> AppResult<()> {
    if input.name.trim().is_empty() {
        return Err(field_error("name", "Name cannot be empty"));
    }
    validate_indian_phone(&input.phone).map_err(|msg| field_error("phone", msg))?;
    validate_pincode(&input.pincode).map_err(|msg| field_error("pincode", msg))?;
    validate_area_hectares(input.area_hectares)
        .map_err(|msg| field_error("area_hectares", msg))?;
    Ok(())
}

fn field_error(field: &str, message: &str) -> AppError {
    AppError::Validation {
        field: field.to_string(),
        message: message.to_string(),
    }
}
