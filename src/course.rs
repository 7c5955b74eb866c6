//! Course enrollment with a waitlist
//!
//! Students enroll until the course is full; everyone after that waits in
//! arrival order and is promoted when an enrolled student leaves.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Enrollment errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CourseError {
    #[error("{0} is already in this course")]
    AlreadyEnrolled(String),
    #[error("{0} is neither enrolled nor waitlisted")]
    UnknownStudent(String),
}

/// Where a student ended up after [`Course::add_student`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Enrolled,
    Waitlisted,
}

/// A course with a fixed number of seats
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Course {
    name: String,
    capacity: usize,
    enrolled: Vec<String>,
    waitlist: Vec<String>,
}

impl Course {
    /// Create a course with no seats
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
    }

    /// Enrolled students in sorted order
    pub fn enrolled(&self) -> &[String] {
        &self.enrolled
    }

    /// Waitlisted students in the order they were added
    pub fn waitlist(&self) -> &[String] {
        &self.waitlist
    }

    fn contains(&self, student: &str) -> bool {
        self.enrolled.iter().any(|s| s == student) || self.waitlist.iter().any(|s| s == student)
    }

    /// Enroll a student, or waitlist them if the course is full
    pub fn add_student(&mut self, student: &str) -> Result<Placement, CourseError> {
        if self.contains(student) {
            log::warn!("{} tried to join {} twice", student, self.name);
            return Err(CourseError::AlreadyEnrolled(student.to_string()));
        }

        if self.enrolled.len() < self.capacity {
            let pos = self
                .enrolled
                .binary_search_by(|s| s.as_str().cmp(student))
                .unwrap_or_else(|pos| pos);
            self.enrolled.insert(pos, student.to_string());
            Ok(Placement::Enrolled)
        } else {
            self.waitlist.push(student.to_string());
            Ok(Placement::Waitlisted)
        }
    }

    /// Drop a student. Freeing a seat promotes the first waitlisted student.
    ///
    /// Returns the promoted student, if any.
    pub fn remove_student(&mut self, student: &str) -> Result<Option<String>, CourseError> {
        if let Some(pos) = self.enrolled.iter().position(|s| s == student) {
            self.enrolled.remove(pos);
            if self.waitlist.is_empty() {
                return Ok(None);
            }
            let promoted = self.waitlist.remove(0);
            let pos = self
                .enrolled
                .binary_search(&promoted)
                .unwrap_or_else(|pos| pos);
            self.enrolled.insert(pos, promoted.clone());
            log::debug!("{} promoted from the {} waitlist", promoted, self.name);
            return Ok(Some(promoted));
        }

        if let Some(pos) = self.waitlist.iter().position(|s| s == student) {
            self.waitlist.remove(pos);
            return Ok(None);
        }

        log::warn!("{} is not in {}", student, self.name);
        Err(CourseError::UnknownStudent(student.to_string()))
    }
}

impl PartialEq for Course {
    /// Courses match when they enroll the same students and have the same
    /// waitlist in the same order
    fn eq(&self, other: &Self) -> bool {
        self.enrolled == other.enrolled && self.waitlist == other.waitlist
    }
}

impl Eq for Course {}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "The course {} has {} student(s) enrolled with {} student(s) on the waitlist.",
            self.name,
            self.enrolled.len(),
            self.waitlist.len()
        )
    }
}
