/// Business logic layer for blog-service
///
/// - Visibility: which posts a viewer may read
/// - Pagination: fixed-size page arithmetic
/// - Posts / comments / profiles: reads and ownership-checked mutations
/// - Accounts: registration and login
/// - Catalog: categories and locations
pub mod accounts;
pub mod catalog;
pub mod comments;
pub mod pagination;
pub mod posts;
pub mod profiles;
pub mod visibility;

pub use accounts::AccountService;
pub use catalog::CatalogService;
pub use comments::CommentService;
pub use pagination::{Page, PageQuery, PageRequest, PAGE_SIZE};
pub use posts::PostService;
pub use profiles::ProfileService;
