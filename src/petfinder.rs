//! Petfinder v1 (`pet.getRandom`) response format.
//!
//! Every scalar in a Petfinder JSON payload is wrapped as `{"$t": "..."}`, empty
//! values come back as `{}`, and lists of one element collapse into a bare object.
//! The types here absorb those quirks so that [`PetRecord`] only ever sees
//! normalized fields. Names and descriptions are also run through
//! [`clean`](crate::clean) here.

use crate::clean::{clean_description, clean_name};
use crate::{Error, PetAttributes, PetRecord, Result, Sex};
use serde::Deserialize;

/// Prefix of the public listing page for a pet id.
pub const PETDETAIL_URL: &str = "https://www.petfinder.com/petdetail/";

/// Index of the preferred photo in the listing's photo list.
const PREFERRED_PHOTO: usize = 2;

#[derive(Debug, Deserialize)]
pub(crate) struct Envelope {
    pub petfinder: Body,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Body {
    pub header: Option<Header>,
    pub pet: Option<RawPet>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Header {
    pub status: Option<Status>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Status {
    pub code: Option<Text>,
    pub message: Option<Text>,
}

/// A `{"$t": "..."}` node. `{}` decodes to an empty string.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct Text {
    #[serde(rename = "$t", default)]
    pub value: String,
}

/// A field that holds either one element or an array of them.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawPet {
    pub id: Text,
    pub name: Option<Text>,
    pub animal: Option<Text>,
    pub sex: Option<Text>,
    pub breeds: Option<Breeds>,
    pub media: Option<Media>,
    pub description: Option<Text>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Breeds {
    pub breed: Option<OneOrMany<Text>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Media {
    pub photos: Option<Photos>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Photos {
    pub photo: Option<OneOrMany<Text>>,
}

impl Header {
    /// Status code and message, if Petfinder sent them.
    pub fn status(&self) -> (Option<&str>, Option<&str>) {
        let status = self.status.as_ref();
        (
            status.and_then(|s| s.code.as_ref()).map(|t| t.value.as_str()),
            status.and_then(|s| s.message.as_ref()).map(|t| t.value.as_str()),
        )
    }
}

impl RawPet {
    /// Normalizes the listing into a [`PetRecord`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRecord`] if the listing has no breeds, since no
    /// label can be formed from it.
    pub fn into_record(self) -> Result<PetRecord> {
        let id = self.id.value;

        let breeds: Vec<String> = self
            .breeds
            .and_then(|b| b.breed)
            .map(OneOrMany::into_vec)
            .unwrap_or_default()
            .into_iter()
            .map(|t| t.value)
            .filter(|b| !b.trim().is_empty())
            .collect();
        if breeds.is_empty() {
            return Err(Error::InvalidRecord(format!("pet {} lists no breeds", id)));
        }

        let mut photos = self
            .media
            .and_then(|m| m.photos)
            .and_then(|p| p.photo)
            .map(OneOrMany::into_vec)
            .unwrap_or_default();
        let photo = if photos.len() > PREFERRED_PHOTO {
            Some(photos.swap_remove(PREFERRED_PHOTO).value)
        } else {
            photos.into_iter().next().map(|t| t.value)
        };

        let sex = self
            .sex
            .map(|t| Sex::from_code(&t.value))
            .unwrap_or_default();

        Ok(PetRecord::new(PetAttributes {
            link: Some(format!("{}{}", PETDETAIL_URL, id)),
            id: Some(id),
            breeds: Some(breeds),
            description: non_empty(self.description.map(|t| clean_description(&t.value))),
            name: non_empty(self.name.map(|t| clean_name(&t.value))),
            photo: photo.filter(|p| !p.is_empty()),
            sex: Some(sex),
            kind: non_empty(self.animal.map(|t| t.value)),
        }))
    }
}

fn non_empty(text: Option<String>) -> Option<String> {
    text.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(value: serde_json::Value) -> Envelope {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_single_breed_is_normalized_to_list() {
        let envelope = decode(json!({
            "petfinder": {
                "pet": {
                    "id": {"$t": "42"},
                    "name": {"$t": "biscuit"},
                    "animal": {"$t": "Cat"},
                    "sex": {"$t": "F"},
                    "breeds": {"breed": {"$t": "Domestic Short Hair"}},
                    "media": {}
                }
            }
        }));

        let pet = envelope.petfinder.pet.unwrap().into_record().unwrap();
        assert_eq!(pet.breeds(), ["Domestic Short Hair".to_string()]);
        assert_eq!(pet.sex(), Some(Sex::Female));
        assert_eq!(pet.link(), Some("https://www.petfinder.com/petdetail/42"));
        assert_eq!(pet.photo(), None);
        assert_eq!(pet.breed_or_animal(), "#ShortHair #Cat");
    }

    #[test]
    fn test_breed_list_and_third_photo() {
        let envelope = decode(json!({
            "petfinder": {
                "pet": {
                    "id": {"$t": "7"},
                    "name": {"$t": "Rex"},
                    "animal": {"$t": "Dog"},
                    "sex": {"$t": "M"},
                    "description": {"$t": "Loves walks."},
                    "breeds": {"breed": [{"$t": "Boxer"}, {"$t": "Beagle"}]},
                    "media": {"photos": {"photo": [
                        {"@size": "x", "@id": "1", "$t": "https://photos/1-x.jpg"},
                        {"@size": "pn", "@id": "1", "$t": "https://photos/1-pn.jpg"},
                        {"@size": "fpm", "@id": "1", "$t": "https://photos/1-fpm.jpg"}
                    ]}}
                }
            }
        }));

        let pet = envelope.petfinder.pet.unwrap().into_record().unwrap();
        assert_eq!(pet.format_breed(), "#Boxer / #Beagle mix");
        assert_eq!(pet.photo(), Some("https://photos/1-fpm.jpg"));
        assert_eq!(pet.description(), Some("Loves walks."));
    }

    #[test]
    fn test_name_and_description_are_cleaned() {
        let envelope = decode(json!({
            "petfinder": {
                "pet": {
                    "id": {"$t": "11"},
                    "name": {"$t": "Doli ***Home for the Holidays 1/2 price!"},
                    "animal": {"$t": "Dog"},
                    "sex": {"$t": "F"},
                    "description": {"$t": "Doli&nbsp;is   a  <b>gem</b> &amp; loves\n\nkids."},
                    "breeds": {"breed": {"$t": "Terrier"}}
                }
            }
        }));

        let pet = envelope.petfinder.pet.unwrap().into_record().unwrap();
        assert_eq!(pet.name(), Some("Doli"));
        assert_eq!(pet.description(), Some("Doli is a <b>gem</b> & loves kids."));
        assert_eq!(
            pet.message(),
            "Doli, a female #Terrier. https://www.petfinder.com/petdetail/11"
        );
    }

    #[test]
    fn test_promotion_only_name_is_absent() {
        let envelope = decode(json!({
            "petfinder": {
                "pet": {
                    "id": {"$t": "12"},
                    "name": {"$t": "*** Adopt me ***"},
                    "animal": {"$t": "Cat"},
                    "breeds": {"breed": {"$t": "Tabby"}}
                }
            }
        }));

        let pet = envelope.petfinder.pet.unwrap().into_record().unwrap();
        assert_eq!(pet.name(), None);
    }

    #[test]
    fn test_falls_back_to_first_photo() {
        let envelope = decode(json!({
            "petfinder": {
                "pet": {
                    "id": {"$t": "8"},
                    "animal": {"$t": "Dog"},
                    "breeds": {"breed": {"$t": "Pug"}},
                    "media": {"photos": {"photo": {"@size": "x", "$t": "https://photos/only.jpg"}}}
                }
            }
        }));

        let pet = envelope.petfinder.pet.unwrap().into_record().unwrap();
        assert_eq!(pet.photo(), Some("https://photos/only.jpg"));
    }

    #[test]
    fn test_unknown_or_missing_sex_is_unspecified() {
        for sex in [json!({"$t": "U"}), json!({})] {
            let envelope = decode(json!({
                "petfinder": {
                    "pet": {
                        "id": {"$t": "9"},
                        "animal": {"$t": "Rabbit"},
                        "sex": sex,
                        "breeds": {"breed": {"$t": "Lop Eared"}}
                    }
                }
            }));

            let pet = envelope.petfinder.pet.unwrap().into_record().unwrap();
            assert_eq!(pet.sex(), Some(Sex::Unspecified));
        }
    }

    #[test]
    fn test_no_breeds_is_invalid() {
        let envelope = decode(json!({
            "petfinder": {
                "pet": {
                    "id": {"$t": "10"},
                    "animal": {"$t": "Dog"},
                    "breeds": {}
                }
            }
        }));

        let err = envelope.petfinder.pet.unwrap().into_record().unwrap_err();
        assert!(matches!(err, Error::InvalidRecord(_)));
    }

    #[test]
    fn test_header_without_pet() {
        let envelope = decode(json!({
            "petfinder": {
                "header": {
                    "status": {"code": {"$t": "201"}, "message": {"$t": "shelter opt-out"}}
                }
            }
        }));

        assert!(envelope.petfinder.pet.is_none());
        let header = envelope.petfinder.header.unwrap();
        assert_eq!(header.status(), (Some("201"), Some("shelter opt-out")));
    }
}
