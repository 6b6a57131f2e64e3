pub mod schedule_dto;
