pub mod domain;
pub mod fields;
pub mod logo;
pub mod media;
pub mod ports;
pub mod uniqueness;

pub use domain::{
    CompanyProfile, Contact, Coordinates, Culture, Differentiator, IconKey, MetaTags,
    Opportunities, OwnerIdentity, PageMap, SearchResult, SocialMedia, Technology,
    UniquenessCategory, UniquenessContent,
};
pub use fields::{DisplayKind, ProfileEditor, ProfileField};
pub use logo::LogoResolver;
pub use ports::{
    CompanyDirectoryService, CompanySearchService, ImageHostingService, LogoSearchService,
    NarrativeGenerationService, PortError, PortResult, ProfileGenerationService,
    UniquenessGenerationService,
};
