use serde::{Deserialize, Serialize};

/// Avatar usato quando l'utente non ha un'immagine salvata.
pub const DEFAULT_AVATAR: &str = "img/default.jpg";

/// Profilo utente letto dalla tabella `users` (di proprietà del sottosistema di identità).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub firstname: String,
    pub lastname: String,
    pub telefono: Option<String>,
    pub direccion: Option<String>,
    pub email: Option<String>,
    pub img_url: Option<String>,
}

impl UserProfile {
    /// Nome visualizzato: "nome cognome".
    pub fn nombre(&self) -> String {
        format!("{} {}", self.firstname, self.lastname)
    }

    /// Riferimento all'immagine, con il placeholder se vuoto.
    pub fn imagen(&self) -> String {
        match self.img_url.as_deref() {
            Some(url) if !url.trim().is_empty() => url.to_string(),
            _ => DEFAULT_AVATAR.to_string(),
        }
    }
}
