//! Persona registry: built-in experts plus user-defined ones

use super::entities::{Persona, PersonaId};
use crate::core::error::DomainError;

/// Built-in experts as `(id, name, description)`
const BUILTIN_PERSONAS: &[(&str, &str, &str)] = &[
    (
        "fizik",
        "Fizik",
        "Maddenin, enerjinin, uzayın ve zamanın temel yasalarını deney ve matematiksel modellerle inceleyen bilim dalı.",
    ),
    (
        "felsefe",
        "Felsefe",
        "Varlık, bilgi, değer ve akıl üzerine kavramsal analiz ve mantıksal argümantasyonla düşünen disiplin.",
    ),
    (
        "biyoloji",
        "Biyoloji",
        "Canlıların yapısını, işleyişini, evrimini ve ekosistemlerle ilişkisini gözlem ve deneyle araştıran bilim dalı.",
    ),
    (
        "ekonomi",
        "Ekonomi",
        "Kıt kaynakların üretim, dağıtım ve tüketimini bireysel ve toplumsal düzeyde modelleyen sosyal bilim.",
    ),
    (
        "matematik",
        "Matematik",
        "Sayı, yapı, uzay ve değişimi aksiyomatik yöntem ve kesin ispatlarla inceleyen soyut bilim.",
    ),
    (
        "kimya",
        "Kimya",
        "Maddenin bileşimini, özelliklerini ve tepkimelerini atomik ve moleküler düzeyde inceleyen bilim dalı.",
    ),
    (
        "tarih",
        "Tarih",
        "Geçmiş olayları belgeler ve kaynak eleştirisi yoluyla yeniden kuran ve nedenselliklerini yorumlayan disiplin.",
    ),
    (
        "psikoloji",
        "Psikoloji",
        "Zihinsel süreçleri ve davranışı deneysel ve klinik yöntemlerle inceleyen bilim dalı.",
    ),
    (
        "sosyoloji",
        "Sosyoloji",
        "Toplumsal yapıları, kurumları ve grup davranışlarını nicel ve nitel araştırmalarla çözümleyen sosyal bilim.",
    ),
    (
        "bilgisayar-bilimi",
        "Bilgisayar Bilimi",
        "Hesaplamanın kuramsal temellerini, algoritmaları ve yazılım sistemlerini tasarlayan ve çözümleyen disiplin.",
    ),
    (
        "hukuk",
        "Hukuk",
        "Toplumsal düzeni sağlayan kuralları, bunların yorumunu ve uygulanmasını inceleyen disiplin.",
    ),
    (
        "cevre-bilimi",
        "Çevre Bilimi",
        "İnsan etkinliklerinin doğal sistemler üzerindeki etkilerini disiplinlerarası yöntemlerle araştıran bilim dalı.",
    ),
];

/// Registry of personas keyed by id
///
/// Built-in personas always win an id lookup; custom personas are refused if
/// their id would shadow an existing entry.
#[derive(Debug, Clone)]
pub struct PersonaRegistry {
    builtin: Vec<Persona>,
    custom: Vec<Persona>,
}

impl Default for PersonaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PersonaRegistry {
    /// Registry with the built-in experts and no custom ones
    pub fn new() -> Self {
        let builtin = BUILTIN_PERSONAS
            .iter()
            .map(|(id, name, description)| Persona::new(*id, *name, *description))
            .collect();
        Self {
            builtin,
            custom: Vec::new(),
        }
    }

    /// Registry with no personas at all (tests, embedding callers)
    pub fn empty() -> Self {
        Self {
            builtin: Vec::new(),
            custom: Vec::new(),
        }
    }

    /// Registry holding exactly the given personas as its fixed set
    pub fn from_personas(personas: Vec<Persona>) -> Self {
        Self {
            builtin: personas,
            custom: Vec::new(),
        }
    }

    /// Attach previously stored custom personas. Entries that collide with an
    /// existing id are skipped.
    pub fn with_custom(mut self, custom: Vec<Persona>) -> Self {
        for persona in custom {
            if self.get(persona.id()).is_none() {
                self.custom.push(persona);
            }
        }
        self
    }

    pub fn get(&self, id: &PersonaId) -> Option<&Persona> {
        self.builtin
            .iter()
            .chain(self.custom.iter())
            .find(|p| p.id() == id)
    }

    pub fn contains(&self, id: &PersonaId) -> bool {
        self.get(id).is_some()
    }

    pub fn is_builtin(&self, id: &PersonaId) -> bool {
        self.builtin.iter().any(|p| p.id() == id)
    }

    pub fn builtin(&self) -> &[Persona] {
        &self.builtin
    }

    pub fn custom(&self) -> &[Persona] {
        &self.custom
    }

    /// All personas, built-ins first
    pub fn all(&self) -> impl Iterator<Item = &Persona> {
        self.builtin.iter().chain(self.custom.iter())
    }

    /// Look up every id in order
    pub fn resolve(&self, ids: &[PersonaId]) -> Result<Vec<Persona>, DomainError> {
        ids.iter()
            .map(|id| {
                self.get(id)
                    .cloned()
                    .ok_or_else(|| DomainError::UnknownPersona(id.to_string()))
            })
            .collect()
    }

    /// Add a user-defined persona, returning it
    pub fn add_custom(&mut self, name: &str, description: &str) -> Result<Persona, DomainError> {
        let persona = Persona::custom(name, description)?;
        if self.contains(persona.id()) {
            return Err(DomainError::InvalidPersona(format!(
                "an expert with id '{}' already exists",
                persona.id()
            )));
        }
        self.custom.push(persona.clone());
        Ok(persona)
    }

    /// Replace the name and description of a custom persona. The id is kept.
    pub fn update_custom(
        &mut self,
        id: &PersonaId,
        name: &str,
        description: &str,
    ) -> Result<Persona, DomainError> {
        if name.trim().is_empty() || description.trim().is_empty() {
            return Err(DomainError::InvalidPersona(
                "name and description cannot be empty".to_string(),
            ));
        }
        let slot = self
            .custom
            .iter_mut()
            .find(|p| p.id() == id)
            .ok_or_else(|| DomainError::UnknownPersona(id.to_string()))?;
        *slot = slot.with_details(name, description);
        Ok(slot.clone())
    }

    /// Remove a custom persona. Built-ins cannot be removed.
    pub fn remove_custom(&mut self, id: &PersonaId) -> Result<Persona, DomainError> {
        if self.is_builtin(id) {
            return Err(DomainError::InvalidPersona(format!(
                "built-in expert '{}' cannot be removed",
                id
            )));
        }
        let index = self
            .custom
            .iter()
            .position(|p| p.id() == id)
            .ok_or_else(|| DomainError::UnknownPersona(id.to_string()))?;
        Ok(self.custom.remove(index))
    }
}
