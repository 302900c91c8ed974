//! User-facing strings in the two supported languages.

use omada_config::Language;

pub struct Messages {
    pub unassigned: &'static str,
    pub online: &'static str,
    pub offline: &'static str,
    pub no_ssids: &'static str,
    pub no_access_points: &'static str,
    pub no_wlan_groups: &'static str,
    pub no_results_for: &'static str,
    pub change_applied: &'static str,
    pub confirm_assign: &'static str,
    pub config_saved: &'static str,
    pub controller_url: &'static str,
    pub username: &'static str,
    pub password: &'static str,
    pub language: &'static str,
}

const ES: Messages = Messages {
    unassigned: "Sin asignar",
    online: "En línea",
    offline: "Desconectado",
    no_ssids: "Sin SSIDs",
    no_access_points: "No hay access points disponibles",
    no_wlan_groups: "No hay grupos WLAN disponibles",
    no_results_for: "No hay resultados para",
    change_applied: "Cambio aplicado correctamente",
    confirm_assign: "¿Asignar \"{wlan}\" al AP \"{ap}\"?",
    config_saved: "Configuración guardada en",
    controller_url: "URL del controlador",
    username: "Usuario",
    password: "Contraseña",
    language: "Idioma",
};

const EN: Messages = Messages {
    unassigned: "Unassigned",
    online: "Online",
    offline: "Offline",
    no_ssids: "No SSIDs",
    no_access_points: "No access points available",
    no_wlan_groups: "No WLAN groups available",
    no_results_for: "No results for",
    change_applied: "Change applied successfully",
    confirm_assign: "Assign \"{wlan}\" to AP \"{ap}\"?",
    config_saved: "Configuration saved to",
    controller_url: "Controller URL",
    username: "Username",
    password: "Password",
    language: "Language",
};

pub fn messages(language: Language) -> &'static Messages {
    match language {
        Language::Es => &ES,
        Language::En => &EN,
    }
}

impl Messages {
    pub fn confirm_assign(&self, wlan: &str, ap: &str) -> String {
        self.confirm_assign
            .replace("{wlan}", wlan)
            .replace("{ap}", ap)
    }

    pub fn no_results(&self, filter: &str) -> String {
        format!("{} \"{filter}\"", self.no_results_for)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirm_prompt_is_interpolated() {
        assert_eq!(
            messages(Language::En).confirm_assign("Guests", "Lobby"),
            "Assign \"Guests\" to AP \"Lobby\"?"
        );
        assert_eq!(
            messages(Language::Es).confirm_assign("Guests", "Lobby"),
            "¿Asignar \"Guests\" al AP \"Lobby\"?"
        );
    }
}
