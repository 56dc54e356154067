use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use thiserror::Error;

/// Ages the survey offers.
pub const AGE_RANGE: RangeInclusive<u8> = 3..=12;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DemographicsError {
    #[error("age `{0}` is not one of the offered options ({min}-{max})", min = AGE_RANGE.start(), max = AGE_RANGE.end())]
    Age(String),
    #[error("gender `{0}` is not one of male, female, other")]
    Gender(String),
    #[error("expected yes or no for first language, got `{0}`")]
    EnglishFirst(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// Survey answers collected after consent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Demographics {
    pub age: u8,
    pub gender: Gender,
    pub english_first: bool,
}

impl Demographics {
    /// Validates raw form answers against the options the survey offers.
    pub fn parse(age: &str, gender: &str, english_first: &str) -> Result<Self, DemographicsError> {
        let age = age
            .trim()
            .parse::<u8>()
            .ok()
            .filter(|a| AGE_RANGE.contains(a))
            .ok_or_else(|| DemographicsError::Age(age.trim().to_string()))?;

        let gender = match gender.trim().to_lowercase().as_str() {
            "male" => Gender::Male,
            "female" => Gender::Female,
            "other" => Gender::Other,
            _ => return Err(DemographicsError::Gender(gender.trim().to_string())),
        };

        let english_first = match english_first.trim().to_lowercase().as_str() {
            "yes" => true,
            "no" => false,
            _ => {
                return Err(DemographicsError::EnglishFirst(
                    english_first.trim().to_string(),
                ));
            }
        };

        Ok(Self {
            age,
            gender,
            english_first,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_offered_options() {
        let d = Demographics::parse(" 7", "Female", "YES").unwrap();
        assert_eq!(
            d,
            Demographics {
                age: 7,
                gender: Gender::Female,
                english_first: true,
            }
        );
    }

    #[test]
    fn rejects_ages_outside_survey() {
        assert_eq!(
            Demographics::parse("2", "male", "no"),
            Err(DemographicsError::Age("2".into()))
        );
        assert!(Demographics::parse("13", "male", "no").is_err());
        assert!(Demographics::parse("seven", "male", "no").is_err());
    }

    #[test]
    fn rejects_unknown_answers() {
        assert_eq!(
            Demographics::parse("5", "robot", "no"),
            Err(DemographicsError::Gender("robot".into()))
        );
        assert_eq!(
            Demographics::parse("5", "other", "maybe"),
            Err(DemographicsError::EnglishFirst("maybe".into()))
        );
    }
}
