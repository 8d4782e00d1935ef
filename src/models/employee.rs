//! Employee model and related types.
//!
//! Employees are reference data for the engine: they are supplied by the
//! external collaborator, validated once at load time and then only read.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Lowest allowed skill rating.
pub const MIN_SKILL_RATING: u8 = 1;
/// Highest allowed skill rating.
pub const MAX_SKILL_RATING: u8 = 5;

/// The access role of an employee.
///
/// The engine treats the role as an opaque capability; it never makes
/// authorisation decisions itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Manages staff records and sees team overviews.
    #[serde(alias = "admin")]
    Administrator,
    /// A regular employee.
    #[default]
    #[serde(alias = "employee")]
    Standard,
    /// A temporary or contract worker.
    Temporary,
}

/// A named skill with a proficiency rating from 1 to 5.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    /// The skill name (e.g., "forklift").
    pub name: String,
    /// Proficiency from [`MIN_SKILL_RATING`] to [`MAX_SKILL_RATING`].
    pub rating: u8,
}

/// Represents an employee who can hold leave records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name.
    pub name: String,
    /// The employee's role.
    #[serde(default)]
    pub role: Role,
    /// Skills in the order they were recorded.
    #[serde(default)]
    pub skills: Vec<Skill>,
    /// Yearly leave allowance in business days. Falls back to the configured
    /// default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_allowance_days: Option<u32>,
}

impl Employee {
    /// Checks the invariants the engine relies on.
    ///
    /// # Example
    ///
    /// ```
    /// use leave_engine::models::{Employee, Role, Skill};
    ///
    /// let mut employee = Employee {
    ///     id: "emp_001".to_string(),
    ///     name: "Anna Schmidt".to_string(),
    ///     role: Role::Standard,
    ///     skills: vec![Skill { name: "forklift".to_string(), rating: 4 }],
    ///     annual_allowance_days: None,
    /// };
    /// assert!(employee.validate().is_ok());
    ///
    /// employee.skills[0].rating = 6;
    /// assert!(employee.validate().is_err());
    /// ```
    pub fn validate(&self) -> EngineResult<()> {
        if self.id.trim().is_empty() {
            return Err(EngineError::InvalidEmployee {
                field: "id".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        if self.name.trim().is_empty() {
            return Err(EngineError::InvalidEmployee {
                field: "name".to_string(),
                message: format!("employee '{}' has an empty name", self.id),
            });
        }

        if let Some(skill) = self
            .skills
            .iter()
            .find(|s| !(MIN_SKILL_RATING..=MAX_SKILL_RATING).contains(&s.rating))
        {
            return Err(EngineError::InvalidEmployee {
                field: "skills".to_string(),
                message: format!(
                    "rating {} for skill '{}' is outside {}..={}",
                    skill.rating, skill.name, MIN_SKILL_RATING, MAX_SKILL_RATING
                ),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_employee(role: Role) -> Employee {
        Employee {
            id: "emp_001".to_string(),
            name: "Anna Schmidt".to_string(),
            role,
            skills: vec![
                Skill {
                    name: "Forklift".to_string(),
                    rating: 4,
                },
                Skill {
                    name: "First aid".to_string(),
                    rating: 2,
                },
            ],
            annual_allowance_days: Some(28),
        }
    }

    #[test]
    fn test_deserialize_minimal_employee() {
        let json = r#"{"id": "emp_001", "name": "Anna Schmidt"}"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.id, "emp_001");
        assert_eq!(employee.role, Role::Standard);
        assert!(employee.skills.is_empty());
        assert_eq!(employee.annual_allowance_days, None);
    }

    #[test]
    fn test_deserialize_role_aliases() {
        let admin: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(admin, Role::Administrator);

        let standard: Role = serde_json::from_str("\"employee\"").unwrap();
        assert_eq!(standard, Role::Standard);

        let temporary: Role = serde_json::from_str("\"temporary\"").unwrap();
        assert_eq!(temporary, Role::Temporary);
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(
            serde_json::to_string(&Role::Administrator).unwrap(),
            "\"administrator\""
        );
        assert_eq!(serde_json::to_string(&Role::Standard).unwrap(), "\"standard\"");
    }

    #[test]
    fn test_skills_keep_their_order() {
        let json = r#"{
            "id": "emp_002",
            "name": "Ben Weber",
            "role": "temporary",
            "skills": [
                {"name": "Welding", "rating": 5},
                {"name": "Crane", "rating": 1},
                {"name": "Painting", "rating": 3}
            ]
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        let names: Vec<_> = employee.skills.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Welding", "Crane", "Painting"]);
    }

    #[test]
    fn test_validate_accepts_valid_employee() {
        assert!(create_test_employee(Role::Standard).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_id() {
        let mut employee = create_test_employee(Role::Standard);
        employee.id = "  ".to_string();

        match employee.validate() {
            Err(EngineError::InvalidEmployee { field, .. }) => assert_eq!(field, "id"),
            other => panic!("Expected InvalidEmployee, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_empty_name() {
        let mut employee = create_test_employee(Role::Standard);
        employee.name = String::new();

        match employee.validate() {
            Err(EngineError::InvalidEmployee { field, .. }) => assert_eq!(field, "name"),
            other => panic!("Expected InvalidEmployee, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_out_of_range_ratings() {
        for rating in [0, 6] {
            let mut employee = create_test_employee(Role::Standard);
            employee.skills[1].rating = rating;

            match employee.validate() {
                Err(EngineError::InvalidEmployee { field, message }) => {
                    assert_eq!(field, "skills");
                    assert!(message.contains("First aid"));
                }
                other => panic!("Expected InvalidEmployee, got {other:?}"),
            }
        }
    }
}
