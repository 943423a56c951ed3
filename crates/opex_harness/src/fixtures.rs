//! Shared seed data for the harness tests.

use uuid::Uuid;

use opex_core::{BilingualText, Language, Pillar, Session, ROLE_SUPERVISOR};

use crate::memstore::MemoryStore;

/// A seeded catalogue: two active pillars with three elements.
/// `e1`/`e2` belong to Safety, `e3` to Quality.
pub struct Catalogue {
    pub safety_id: Uuid,
    pub quality_id: Uuid,
    pub e1: Uuid,
    pub e2: Uuid,
    pub e3: Uuid,
}

pub fn pillar(code: &str, local: &str, en: &str) -> Pillar {
    Pillar {
        id: Uuid::new_v4(),
        code: code.into(),
        name: BilingualText::new(local, Some(en.into())),
        description: BilingualText::default(),
        active: true,
    }
}

pub async fn seed_catalogue(store: &MemoryStore) -> Catalogue {
    let safety = pillar("SAF", "Segurança", "Safety");
    let quality = pillar("QUA", "Qualidade", "Quality");
    let safety_id = safety.id;
    let quality_id = quality.id;
    store.insert_pillar(safety).await;
    store.insert_pillar(quality).await;

    let e1 = Uuid::new_v4();
    let e2 = Uuid::new_v4();
    let e3 = Uuid::new_v4();
    store
        .insert_element(e1, "SAF-01", BilingualText::local("Registro de riscos"), Some(safety_id))
        .await;
    store
        .insert_element(e2, "SAF-02", BilingualText::local("Treinamento"), Some(safety_id))
        .await;
    store
        .insert_element(e3, "QUA-01", BilingualText::local("Auditoria"), Some(quality_id))
        .await;

    Catalogue {
        safety_id,
        quality_id,
        e1,
        e2,
        e3,
    }
}

/// A regular end-user session in the local language.
pub fn user_session() -> Session {
    Session::new("user-1", vec![], Language::Local)
}

/// A supervisor session, English display language.
pub fn supervisor_session() -> Session {
    Session::new("sup-1", vec![ROLE_SUPERVISOR.into()], Language::English)
}
