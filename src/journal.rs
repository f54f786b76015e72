// src/journal.rs
//
// Journalisation (natif seulement)
// --------------------------------
// - Filtre via RUST_LOG, sinon `calculatrice_matrices=info`
// - Sortie compacte sur stderr
// - En wasm32 : aucun abonné, les macros tracing restent muettes

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const FILTRE_DEFAUT: &str = "calculatrice_matrices=info";

/// Installe l’abonné global. Un second appel est ignoré.
pub fn init_journal() {
    let filtre = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(FILTRE_DEFAUT));

    let _ = tracing_subscriber::registry()
        .with(filtre)
        .with(fmt::layer().compact().with_target(true))
        .try_init();
}
