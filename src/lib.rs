//! # Cuties - adoptable pet announcements
//!
//! Cuties fetches a random adoptable pet from Petfinder and turns it into a short
//! announcement: name, sex, a hashtag label for the breed (and species where the
//! breed alone doesn't say it), and a link to the listing.
//!
//! ## Quick Start
//!
//! ```no_run
//! use cuties::Config;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), cuties::Error> {
//!     // PETFINDER_KEY must be set, either exported or in a .env file
//!     let client = Config::load()?.client()?;
//!
//!     let pet = client.random().await?;
//!     println!("{}", pet.message());
//!     if let Some(photo) = pet.photo() {
//!         println!("{}", photo);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Formatting
//!
//! Records can also be built by hand, e.g. from another source:
//!
//! ```
//! use cuties::{PetAttributes, PetRecord, Sex};
//!
//! let pet = PetRecord::new(PetAttributes {
//!     name: Some("hazel".to_string()),
//!     sex: Some(Sex::Female),
//!     kind: Some("Pig".to_string()),
//!     breeds: Some(vec!["pot bellied".to_string(), "kunekune".to_string()]),
//!     link: Some("https://www.petfinder.com/petdetail/1".to_string()),
//!     ..Default::default()
//! });
//!
//! assert_eq!(
//!     pet.message(),
//!     "Hazel, a female #PotBellied / #Kunekune mix #Pig. https://www.petfinder.com/petdetail/1"
//! );
//! ```

pub mod clean;
mod client;
pub mod config;
mod error;
mod pet;
mod petfinder;
mod response;

pub use client::{PetfinderClient, PetfinderClientBuilder, DEFAULT_BASE_URL, DEFAULT_SHELTER_ID};
pub use config::Config;
pub use error::{Error, Result};
pub use pet::{hashtagify, PetAttributes, PetRecord, Sex};
pub use petfinder::PETDETAIL_URL;
pub use response::Fetched;
