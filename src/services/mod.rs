//! Concrete block services
//!
//! Ready-made block types a host registers against the service registry:
//! a gallery list block querying the data provider, and breadcrumb blocks
//! assembled from injected menu-builder strategies.

pub mod breadcrumb;
pub mod gallery_list;
pub mod menu;

pub use breadcrumb::{
    BreadcrumbBlockService, GalleryIndexMenu, GalleryViewMenu, MediaViewMenu, MenuBuilder,
};
pub use gallery_list::GalleryListBlockService;
pub use menu::MenuItem;
