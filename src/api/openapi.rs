//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, categories, dashboard, equipment, health, requests, stages, teams, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "GearGuard API",
        version = "1.0.0",
        description = "Maintenance Management System REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api", description = "GearGuard API")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::register,
        auth::login,
        auth::me,
        // Categories
        categories::list_categories,
        categories::create_category,
        categories::get_category,
        categories::update_category,
        categories::delete_category,
        // Users
        users::list_users,
        users::create_user,
        users::get_user,
        // Teams
        teams::list_teams,
        teams::create_team,
        teams::get_team,
        teams::update_team,
        teams::delete_team,
        teams::list_team_equipment,
        teams::list_team_requests,
        // Equipment
        equipment::list_equipment,
        equipment::create_equipment,
        equipment::get_equipment,
        equipment::get_equipment_details,
        equipment::update_equipment,
        equipment::scrap_equipment,
        equipment::list_equipment_requests,
        equipment::count_equipment_requests,
        // Stages
        stages::list_stages,
        stages::create_stage,
        stages::update_stage,
        stages::delete_stage,
        // Requests
        requests::list_requests,
        requests::create_request,
        requests::get_request,
        requests::update_request,
        requests::assign_request_to_me,
        // Dashboard
        dashboard::get_stats,
    ),
    components(
        schemas(
            // Auth
            auth::TokenResponse,
            crate::models::user::User,
            crate::models::user::UserBasic,
            crate::models::user::RegisterUser,
            crate::models::user::LoginUser,
            // Categories
            crate::models::category::Category,
            crate::models::category::CreateCategory,
            crate::models::category::UpdateCategory,
            // Teams
            crate::models::team::Team,
            crate::models::team::CreateTeam,
            crate::models::team::UpdateTeam,
            teams::TeamRequestsResponse,
            // Equipment
            crate::models::equipment::Equipment,
            crate::models::equipment::EquipmentDetails,
            crate::models::equipment::CreateEquipment,
            crate::models::equipment::UpdateEquipment,
            equipment::RequestCountResponse,
            // Stages
            crate::models::stage::Stage,
            crate::models::stage::CreateStage,
            crate::models::stage::UpdateStage,
            // Requests
            crate::models::request::MaintenanceRequest,
            crate::models::request::CreateRequest,
            crate::models::request::UpdateRequest,
            crate::models::request::RequestType,
            crate::models::request::Priority,
            // Dashboard
            dashboard::DashboardStats,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "categories", description = "Equipment category management"),
        (name = "users", description = "User management"),
        (name = "teams", description = "Maintenance team management"),
        (name = "equipment", description = "Equipment management"),
        (name = "stages", description = "Workflow stage management"),
        (name = "requests", description = "Maintenance request workflow"),
        (name = "dashboard", description = "Dashboard statistics")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
