//! Infrastructure layer: storage, fan-out, provider clients and wire DTOs.

pub mod broadcast;
pub mod classifier;
pub mod dto;
pub mod repository;
