//! # marga-nav
//!
//! Tile-grid pathfinding engine with an asynchronous task execution
//! framework, built for settlement-simulation games.
//!
//! ## Overview
//!
//! The engine computes navigable routes between world positions on a
//! discretized tile grid and runs many such computations concurrently off
//! the main simulation thread:
//!
//! - **Region Classification**: flood-fills the grid into connected
//!   components so unreachable requests are rejected without searching
//! - **Pathfinding**: weighted A*-style search over tile centers with floor
//!   speed costs and a diagonal corner-cutting rule
//! - **Task Orchestration**: fixed-size worker pool, tracked completion,
//!   periodic result drain, and safe teardown across world resets
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use marga_nav::{
//!     assign_regions, event_channel, AgentId, EngineConfig, PathRequest,
//!     RequestId, TaskOrchestrator, TileGrid, WorldPos,
//! };
//!
//! let mut grid = TileGrid::new(256, 256);
//! assign_regions(&mut grid);
//! let grid = Arc::new(grid);
//!
//! let (events_tx, events_rx) = event_channel();
//! let config = EngineConfig::default();
//! let mut orchestrator = TaskOrchestrator::new(config.orchestrator(), events_tx)?;
//!
//! orchestrator.request_path(
//!     PathRequest {
//!         origin: WorldPos::new(3.5, 4.5),
//!         destination: WorldPos::new(120.5, 88.5),
//!         agent: AgentId(17),
//!         id: RequestId(1),
//!         callback: Box::new(|waypoints, id| {
//!             println!("request {id:?}: {} waypoints", waypoints.len());
//!         }),
//!     },
//!     Arc::clone(&grid),
//! );
//!
//! // Main loop: once per update.
//! orchestrator.tick(0.016);
//! ```
//!
//! ## Coordinate System
//!
//! World positions are continuous; a tile spans one world unit and its
//! center sits at integer coordinate + (0.5, 0.5). Region connectivity is
//! 4-directional even though agents move in 8 directions.

// Fundamental types
pub mod core;

// Grid adapter and tile storage
pub mod grid;

// Region classification
pub mod regions;

// Pathfinding
pub mod path;

// Task orchestration
pub mod tasks;

// Outcome events
pub mod events;

// Configuration
pub mod config;

// Errors
pub mod error;

// Re-export commonly used types
pub use crate::core::{AgentId, Direction, RequestId, TilePos, WorldPos};

pub use config::EngineConfig;

pub use error::{MargaError, Result, TaskError};

pub use events::{event_channel, EngineEvent, TaskPayload};

pub use grid::{NavGrid, RegionId, RegionKind, Tile, TileGrid, UNASSIGNED_REGION};

pub use path::{find_path, HeightMap, TerrainPathConfig, TerrainPathfinder};

pub use regions::{
    assign_regions, assign_regions_from, assign_sub_regions, seal_enclosed_pockets,
};

pub use tasks::{
    default_worker_count, OrchestratorConfig, PathRequest, PoolState, TaskHandle,
    TaskOrchestrator, TaskPoll,
};
