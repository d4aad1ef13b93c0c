//! # datastore-client
//!
//! Typed async client for the workflow-datastore knowledge-base service:
//! collection management, document ingestion with server-side chunking,
//! vector CRUD, similarity search, RAG retrieval, embedding generation and
//! text extraction, behind one method per remote operation.
//!
//! The service address is discovered through an ordered fallback chain
//! (explicit override, registry lookup, configured URL, compiled-in default)
//! on the first request and cached for the client's lifetime.
//!
//! ## Crate Organization
//!
//! - **`collections`** - Collection lifecycle and tenant-scoped naming
//! - **`documents`** - Document ingestion (chunk + embed) and deletion
//! - **`vectors`** - Raw vector add/delete
//! - **`search`** - Similarity search and RAG retrieval
//! - **`embedding`** - Batch embedding generation
//! - **`extraction`** - Text extraction from uploaded files
//! - **`discovery`** - Service-address resolution
//! - **`config`** - Discovery configuration (environment capture)
//! - **`filter`** - Metadata scoping shared by search and delete
//!
//! ## Quick Start
//!
//! ```no_run
//! use datastore_client::{DataStoreClient, MetadataFilter, SearchOptions};
//!
//! # async fn run() -> datastore_client::Result<()> {
//! let client = DataStoreClient::from_env()?;
//!
//! let info = client.create_collection("tenant-123", "kb", Default::default()).await?;
//!
//! let hits = client
//!     .similarity_search(
//!         &info.name,
//!         "hello",
//!         SearchOptions::new()
//!             .with_top_k(10)
//!             .with_filter(MetadataFilter::new().with_tenant_id("tenant-123")),
//!     )
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! Every operation returns a typed error: callers can match on
//! [`Error::NotFound`], [`Error::Validation`], [`Error::Timeout`],
//! [`Error::Connection`] or [`Error::Api`] for targeted handling.

pub mod builder;
pub mod client;
pub mod collections;
pub mod config;
pub mod discovery;
pub mod documents;
pub mod embedding;
pub mod error;
pub mod extraction;
pub mod filter;
pub mod search;
pub mod vectors;

// ========== Client ==========

/// Builder for [`DataStoreClient`]
pub use builder::DataStoreBuilder;
/// The datastore client and its health-check result
pub use client::{DataStoreClient, Health};
/// The client error type and result alias
pub use error::{Error, Result};

// ========== Discovery ==========

pub use config::{DiscoveryConfig, RegistryConfig};
pub use discovery::{ServiceAddress, resolve};

// ========== Domain types ==========

pub use collections::{CollectionInfo, CollectionOptions, Distance, qualified_collection_name};
pub use documents::{
    ChunkConfig, ChunkStrategy, DocumentChunk, DocumentProcessResult, DocumentScope, NewDocument,
};
pub use embedding::DEFAULT_EMBED_BATCH_SIZE;
pub use extraction::{ExtractionResult, SupportedFormats};
pub use filter::MetadataFilter;
pub use search::{RagContext, RagOptions, SearchHit, SearchOptions};
pub use vectors::VectorRecord;
