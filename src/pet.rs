//! The adoptable pet record and the announcement text built from it.
//!
//! A [`PetRecord`] is an immutable value: it is built once from [`PetAttributes`]
//! and only exposes derived strings. Everything here is pure, so a record can be
//! formatted any number of times from any thread.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whole-label replacements applied after a breed label is formed.
const SYNONYMS: &[(&str, &str)] = &[
    ("#DomesticShortHair", "#ShortHair"),
    ("#DomesticLongHair", "#LongHair"),
];

/// Species whose breed field does not mention the species itself.
const SPECIES_TAGGED: &[&str] = &["Rabbit", "Pig", "Cat"];

/// Mice, chinchillas and friends: the species is already stored as the breed.
const SMALL_AND_FURRY: &str = "Small & Furry";

/// Sex of a listed pet, normalized from Petfinder's one-letter code.
///
/// # Examples
///
/// ```
/// use cuties::Sex;
///
/// assert_eq!(Sex::from_code("M"), Sex::Male);
/// assert_eq!(Sex::from_code("x").to_string(), "gender-unspecified");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
    /// Any code other than `m` or `f`.
    #[default]
    #[serde(rename = "gender-unspecified")]
    Unspecified,
}

impl Sex {
    /// Maps a raw sex code to a [`Sex`]. Unknown codes degrade to
    /// [`Sex::Unspecified`] instead of failing.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "m" => Sex::Male,
            "f" => Sex::Female,
            _ => Sex::Unspecified,
        }
    }

    /// The label used in announcements.
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
            Sex::Unspecified => "gender-unspecified",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field-named initializer for a [`PetRecord`].
///
/// Every field is optional; omitted fields read as absent on the record.
///
/// # Examples
///
/// ```
/// use cuties::{PetAttributes, PetRecord};
///
/// let pet = PetRecord::new(PetAttributes {
///     kind: Some("Rabbit".to_string()),
///     breeds: Some(vec!["lionhead".to_string()]),
///     ..Default::default()
/// });
///
/// assert_eq!(pet.breed_or_animal(), "#Lionhead #Rabbit");
/// assert_eq!(pet.photo(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PetAttributes {
    pub id: Option<String>,
    pub breeds: Option<Vec<String>>,
    pub description: Option<String>,
    pub link: Option<String>,
    pub name: Option<String>,
    pub photo: Option<String>,
    pub sex: Option<Sex>,
    /// Species or category label, e.g. `Dog`, `Cat` or `Small & Furry`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// One adoptable pet, normalized and ready to be announced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PetRecord {
    id: Option<String>,
    breeds: Vec<String>,
    description: Option<String>,
    link: Option<String>,
    name: Option<String>,
    photo: Option<String>,
    sex: Option<Sex>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

impl PetRecord {
    pub fn new(attributes: PetAttributes) -> Self {
        Self {
            id: attributes.id,
            breeds: attributes.breeds.unwrap_or_default(),
            description: attributes.description,
            link: attributes.link,
            name: attributes.name,
            photo: attributes.photo,
            sex: attributes.sex,
            kind: attributes.kind,
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn breeds(&self) -> &[String] {
        &self.breeds
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// URL of the full listing.
    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// URL of the chosen photo, absent when the listing has none.
    pub fn photo(&self) -> Option<&str> {
        self.photo.as_deref()
    }

    pub fn sex(&self) -> Option<Sex> {
        self.sex
    }

    /// Species or category label (`type` on the wire).
    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    /// Joins the hashtagged breeds with `" / "`, marks multi-breed pets as a
    /// `mix`, then swaps the complete label through the synonym table.
    ///
    /// # Examples
    ///
    /// ```
    /// use cuties::{PetAttributes, PetRecord};
    ///
    /// let pet = PetRecord::new(PetAttributes {
    ///     breeds: Some(vec!["domestic short hair".to_string()]),
    ///     ..Default::default()
    /// });
    /// assert_eq!(pet.format_breed(), "#ShortHair");
    /// ```
    pub fn format_breed(&self) -> String {
        let mut label = self
            .breeds
            .iter()
            .map(|breed| hashtagify(breed))
            .collect::<Vec<_>>()
            .join(" / ");

        if label.contains('/') {
            label.push_str(" mix");
        }

        match SYNONYMS.iter().find(|(from, _)| *from == label) {
            Some((_, to)) => (*to).to_string(),
            None => label,
        }
    }

    /// The breed label, followed by a species tag for rabbits, pigs and cats.
    pub fn breed_or_animal(&self) -> String {
        match self.kind.as_deref() {
            Some(kind) if SPECIES_TAGGED.contains(&kind) => {
                format!("{} {}", self.format_breed(), hashtagify(kind))
            }
            Some(SMALL_AND_FURRY) => self.format_breed(),
            _ => self.format_breed(),
        }
    }

    /// Ready-to-post text: `"{Name}, a {sex} {breed_or_animal}. {link}"`.
    ///
    /// Absent fields render empty; an absent sex renders as `gender-unspecified`.
    pub fn message(&self) -> String {
        format!(
            "{}, a {} {}. {}",
            titleize(self.name().unwrap_or_default()),
            self.sex.unwrap_or_default(),
            self.breed_or_animal(),
            self.link().unwrap_or_default(),
        )
    }

    /// Accessibility text for the photo, absent when there is no photo.
    ///
    /// # Examples
    ///
    /// ```
    /// use cuties::{PetAttributes, PetRecord};
    ///
    /// let pet = PetRecord::new(PetAttributes {
    ///     name: Some("rex".to_string()),
    ///     kind: Some("Dog".to_string()),
    ///     breeds: Some(vec!["Boxer".to_string()]),
    ///     photo: Some("https://photos.example/rex.jpg".to_string()),
    ///     ..Default::default()
    /// });
    /// assert_eq!(
    ///     pet.photo_alt_text().as_deref(),
    ///     Some("Photo of Rex, a Boxer dog available for adoption")
    /// );
    /// ```
    pub fn photo_alt_text(&self) -> Option<String> {
        self.photo.as_ref()?;

        let mut subject = self.breeds.join(" / ");
        if self.breeds.len() > 1 {
            subject.push_str(" mix");
        }
        if let Some(kind) = self.kind() {
            if !subject.is_empty() {
                subject.push(' ');
            }
            subject.push_str(&kind.to_lowercase());
        }

        Some(format!(
            "Photo of {}, a {} available for adoption",
            titleize(self.name().unwrap_or_default()),
            subject,
        ))
    }

    /// Hook for rejecting malformed records. Always `false`: Petfinder reports
    /// failures in the response header, which never reaches the record.
    pub fn is_error(&self) -> bool {
        false
    }
}

impl From<PetAttributes> for PetRecord {
    fn from(attributes: PetAttributes) -> Self {
        Self::new(attributes)
    }
}

impl fmt::Display for PetRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Turns a phrase into a single `#CamelCase` token.
///
/// Words are split on whitespace; each one is capitalized (first letter upper,
/// rest lower) and the words are glued together.
///
/// # Examples
///
/// ```
/// assert_eq!(cuties::hashtagify("short hair"), "#ShortHair");
/// assert_eq!(cuties::hashtagify("PIT BULL terrier"), "#PitBullTerrier");
/// ```
pub fn hashtagify(text: &str) -> String {
    let mut tag = String::with_capacity(text.len() + 1);
    tag.push('#');
    for word in text.split_whitespace() {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            tag.extend(first.to_uppercase());
            tag.extend(chars.flat_map(char::to_lowercase));
        }
    }
    tag
}

/// Upper-cases the first letter of every word, leaving the rest alone.
fn titleize(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
