//! Storefront categories.
//!
//! Read path for the categories shown in the storefront. Categories are
//! created and edited by admin flows that live outside this service.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/categories/active` | List categories flagged active |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::PgCategoryRepository;
pub use services::CategoryService;
