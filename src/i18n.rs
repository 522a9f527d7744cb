//! Locale handling and the single table every visible string comes from.

use std::{borrow::Cow, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Es,
    En,
}

impl Locale {
    /// English when the document language is `en` or the page is the
    /// `index_en` variant; Spanish otherwise.
    pub fn detect(lang_attr: Option<&str>, url: &str) -> Self {
        if lang_attr == Some("en") || url.contains("index_en") {
            Locale::En
        } else {
            Locale::Es
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Locale::Es => "es",
            Locale::En => "en",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "es" => Ok(Locale::Es),
            "en" => Ok(Locale::En),
            other => Err(format!("unsupported language flag \"{}\"", other)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextKey {
    LightMode,
    DarkMode,
    PdfDocument,
    Model3d,
    ErrorLoadingImage,
    ErrorLoadingVideo,
    ErrorLoadingPdf,
    DownloadPdf,
    Download3dModel,
    CalculatingSize,
    SizeUnavailable,
    Model3dNote,
    PreviewOf,
    FilterAll,
    FilterAllValue,
    SelectCategory,
    NavAbout,
    NavPortfolio,
    NavContact,
    FormName,
    FormEmail,
    FormMessage,
    SendMessage,
    Sending,
    FillAllFields,
    InvalidEmail,
    FieldRequired,
    MessageSent,
    EmailClientOpened,
    MailSubjectPrefix,
    MailSubjectSuffix,
}

pub fn t(locale: Locale, key: TextKey) -> &'static str {
    use TextKey::*;
    let (es, en) = match key {
        LightMode => ("Modo Claro", "Light Mode"),
        DarkMode => ("Modo Oscuro", "Dark Mode"),
        PdfDocument => ("Documento PDF", "PDF Document"),
        Model3d => ("Modelo 3D", "3D Model"),
        ErrorLoadingImage => ("Error cargando imagen", "Error loading image"),
        ErrorLoadingVideo => ("Error cargando video", "Error loading video"),
        ErrorLoadingPdf => ("Error cargando PDF", "Error loading PDF"),
        DownloadPdf => ("Descargar PDF", "Download PDF"),
        Download3dModel => ("Descargar Modelo 3D", "Download 3D Model"),
        CalculatingSize => ("Calculando tamaño...", "Calculating size..."),
        SizeUnavailable => ("Tamaño no disponible", "Size unavailable"),
        Model3dNote => (
            "Descarga el archivo para verlo en tu software 3D favorito.",
            "Download the file to view it in your favourite 3D software.",
        ),
        PreviewOf => ("Vista previa de", "Preview of"),
        FilterAll => ("Todos", "All"),
        FilterAllValue => ("todos", "all"),
        SelectCategory => ("Seleccionar categoría", "Select category"),
        NavAbout => ("Sobre mí", "About"),
        NavPortfolio => ("Portafolio", "Portfolio"),
        NavContact => ("Contacto", "Contact"),
        FormName => ("Nombre", "Name"),
        FormEmail => ("Email", "Email"),
        FormMessage => ("Mensaje", "Message"),
        SendMessage => ("Enviar mensaje", "Send message"),
        Sending => ("Enviando...", "Sending..."),
        FillAllFields => ("Por favor completa todos los campos", "Please fill in all fields"),
        InvalidEmail => ("Por favor ingresa un email válido", "Please enter a valid email"),
        FieldRequired => ("Este campo es requerido", "This field is required"),
        MessageSent => (
            "¡Mensaje enviado! Te responderé pronto.",
            "Message sent! I will reply soon.",
        ),
        EmailClientOpened => (
            "Cliente de correo abierto. Completa el envío allí.",
            "Email client opened. Complete the sending there.",
        ),
        MailSubjectPrefix => ("Nuevo mensaje de", "New message from"),
        MailSubjectSuffix => ("desde tu portfolio", "from your portfolio"),
    };
    match locale {
        Locale::Es => es,
        Locale::En => en,
    }
}

/// Known project categories. Each accepts both its Spanish and English slug.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    DigitalIllustration,
    GraphicDesign,
    DigitalAnimation,
    Photography,
    WebDevelopment,
    AugmentedReality,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::DigitalIllustration,
        Category::GraphicDesign,
        Category::DigitalAnimation,
        Category::Photography,
        Category::WebDevelopment,
        Category::AugmentedReality,
    ];

    pub fn from_tag(tag: &str) -> Option<Self> {
        Category::ALL
            .into_iter()
            .find(|category| category.slugs().contains(&tag))
    }

    fn slugs(self) -> [&'static str; 2] {
        match self {
            Category::DigitalIllustration => ["ilustracion-digital", "digital-illustration"],
            Category::GraphicDesign => ["diseno-grafico", "graphic-design"],
            Category::DigitalAnimation => ["animacion-digital", "digital-animation"],
            Category::Photography => ["fotografia", "photography"],
            Category::WebDevelopment => ["desarrollo-web", "web-development"],
            Category::AugmentedReality => ["realidad-aumentada", "augmented-reality"],
        }
    }

    pub fn display_name(self, locale: Locale) -> &'static str {
        let (es, en) = match self {
            Category::DigitalIllustration => ("Ilustración Digital", "Digital Illustration"),
            Category::GraphicDesign => ("Diseño Gráfico", "Graphic Design"),
            Category::DigitalAnimation => ("Animación Digital", "Digital Animation"),
            Category::Photography => ("Fotografía", "Photography"),
            Category::WebDevelopment => ("Desarrollo Web", "Web Development"),
            Category::AugmentedReality => ("Realidad Aumentada", "Augmented Reality"),
        };
        match locale {
            Locale::Es => es,
            Locale::En => en,
        }
    }
}

/// Localized display name for a category tag; unknown tags pass through.
pub fn category_name(locale: Locale, tag: &str) -> Cow<'_, str> {
    match Category::from_tag(tag) {
        Some(category) => Cow::Borrowed(category.display_name(locale)),
        None => Cow::Borrowed(tag),
    }
}

/// Whether `value` is the "every category" filter in either locale.
pub fn is_all_filter(value: &str) -> bool {
    value == t(Locale::Es, TextKey::FilterAllValue) || value == t(Locale::En, TextKey::FilterAllValue)
}
