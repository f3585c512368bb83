//! Assembling stages

pub mod attach_comments;
