use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth::{dtos as auth_dtos, handlers as auth_handlers};
use crate::features::contacts::{
    dtos as contacts_dtos, handlers as contacts_handlers, models as contacts_models,
};
use crate::features::dashboard::{dtos as dashboard_dtos, handlers as dashboard_handlers};
use crate::features::hospitals::{dtos as hospitals_dtos, handlers as hospitals_handlers};
use crate::features::locator::{
    dtos as locator_dtos, geo, geolocation, handlers as locator_handlers, map_view,
};
use crate::features::medical_services::{dtos as services_dtos, handlers as services_handlers};
use crate::features::users::{
    dtos as users_dtos, handlers as users_handlers, models as users_models,
};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth_handlers::admin_login,
        auth_handlers::logout,
        auth_handlers::login,
        auth_handlers::get_profile,
        auth_handlers::update_profile,
        // Hospitals
        hospitals_handlers::list_hospitals,
        hospitals_handlers::get_hospital,
        hospitals_handlers::create_hospital,
        hospitals_handlers::update_hospital,
        hospitals_handlers::delete_hospital,
        hospitals_handlers::import_hospitals,
        // Services
        services_handlers::list_catalog,
        services_handlers::list_by_hospital,
        services_handlers::attach_service,
        services_handlers::update_service,
        services_handlers::detach_service,
        // Locator
        locator_handlers::locate,
        locator_handlers::options,
        // Contacts
        contacts_handlers::submit_contact,
        contacts_handlers::list_contacts,
        contacts_handlers::update_contact_status,
        // Users (admin)
        users_handlers::list_users,
        users_handlers::get_user,
        users_handlers::create_user,
        users_handlers::update_user,
        users_handlers::delete_user,
        // Dashboard (admin)
        dashboard_handlers::get_stats,
    ),
    components(
        schemas(
            // Shared
            Meta,
            geo::Coordinate,
            // Auth
            auth_dtos::LoginRequestDto,
            auth_dtos::LoginResponseDto,
            auth_dtos::UpdateProfileDto,
            ApiResponse<auth_dtos::LoginResponseDto>,
            // Users
            users_models::UserRole,
            users_dtos::CreateUserDto,
            users_dtos::UpdateUserDto,
            users_dtos::UserResponseDto,
            ApiResponse<users_dtos::UserResponseDto>,
            ApiResponse<Vec<users_dtos::UserResponseDto>>,
            // Hospitals
            hospitals_dtos::LocationDto,
            hospitals_dtos::ContactInfoDto,
            hospitals_dtos::HospitalListingDto,
            hospitals_dtos::HospitalDetailDto,
            hospitals_dtos::HospitalFieldsDto,
            hospitals_dtos::CreateHospitalDto,
            hospitals_dtos::UpdateHospitalDto,
            hospitals_dtos::ImportSummaryDto,
            ApiResponse<Vec<hospitals_dtos::HospitalListingDto>>,
            ApiResponse<hospitals_dtos::HospitalDetailDto>,
            ApiResponse<hospitals_dtos::ImportSummaryDto>,
            // Services
            services_dtos::ServiceDto,
            services_dtos::CatalogEntryDto,
            services_dtos::HospitalServicesDto,
            services_dtos::AttachServiceDto,
            services_dtos::UpdateServiceDto,
            services_dtos::DetachServiceDto,
            ApiResponse<services_dtos::ServiceDto>,
            ApiResponse<Vec<services_dtos::CatalogEntryDto>>,
            ApiResponse<Vec<services_dtos::HospitalServicesDto>>,
            // Locator
            geolocation::LocationStatus,
            map_view::TileLayer,
            map_view::UserMarker,
            map_view::HospitalMarker,
            map_view::MapView,
            locator_dtos::LocatorHospitalDto,
            locator_dtos::LocatorResponseDto,
            locator_dtos::LocatorOptionsDto,
            ApiResponse<locator_dtos::LocatorResponseDto>,
            ApiResponse<locator_dtos::LocatorOptionsDto>,
            // Contacts
            contacts_models::ContactStatus,
            contacts_dtos::CreateContactDto,
            contacts_dtos::ContactCreatedDto,
            contacts_dtos::ContactResponseDto,
            contacts_dtos::UpdateContactStatusDto,
            ApiResponse<contacts_dtos::ContactCreatedDto>,
            ApiResponse<contacts_dtos::ContactResponseDto>,
            ApiResponse<Vec<contacts_dtos::ContactResponseDto>>,
            // Dashboard
            dashboard_dtos::DashboardStatsDto,
            ApiResponse<dashboard_dtos::DashboardStatsDto>,
        )
    ),
    tags(
        (name = "auth", description = "Admin and user login, session and profile"),
        (name = "hospitals", description = "Hospital listing and maintenance"),
        (name = "services", description = "Medical service catalog and hospital links"),
        (name = "locator", description = "Nearest-hospital search and map view"),
        (name = "contacts", description = "Contact form messages"),
        (name = "users", description = "User accounts (admin only)"),
        (name = "dashboard", description = "Admin dashboard statistics"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "RS GIS Surabaya API",
        version = "0.1.0",
        description = "API documentation for the Surabaya hospital locator",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
