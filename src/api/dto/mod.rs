//! Request and response DTOs for the REST API.

pub mod common_dto;
pub mod equipment_dto;
pub mod stats_dto;
pub mod user_dto;
pub mod visit_dto;

pub use common_dto::{PageMeta, PageQuery};
pub use equipment_dto::{
    CreateEquipmentRequest, EquipmentDto, EquipmentListResponse, InputRecordDto,
    RecordInputRequest, RecordListResponse, UpdateEquipmentRequest,
};
pub use stats_dto::{HeatmapEntryDto, RegionTotalsDto, StatsQuery};
pub use user_dto::{
    ChangePasswordRequest, GradeDto, GradeRequest, UpdateUserRequest, UserDto, UserListResponse,
};
pub use visit_dto::{CreateVisitRequest, UpdateVisitRequest, VisitDto, VisitListResponse};
