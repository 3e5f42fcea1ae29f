//! Built-in lexicon data.
//!
//! Every table here is plain data; [`super::LexiconBuilder`] turns it into the
//! lookup structures the pipeline uses.

/// Replacement glyph for every apostrophe-like character.
pub const APOSTROPHE: char = '\u{2019}';

/// Ellipsis glyph produced from three or more periods.
pub const ELLIPSIS: char = '\u{2026}';

/// Em dash produced from a run of two or more hyphens.
pub const EM_DASH: char = '\u{2014}';

/// En dash.
pub const EN_DASH: char = '\u{2013}';

/// Multi-character triggers a replacement table may contain.
pub const MULTI_CHAR_TRIGGERS: &[&str] = &["...", "<<", ">>", "[[", "]]", "{{", "}}"];

/// Default character replacements, multi-character entries first.
pub const CHAR_REPLACEMENTS: &[(&str, &str)] = &[
    ("...", "\u{2026}"),
    ("<<", "\u{300A}"),
    (">>", "\u{300B}"),
    ("[[", "\u{27E6}"),
    ("]]", "\u{27E7}"),
    ("{{", "\u{2983}"),
    ("}}", "\u{2984}"),
    ("\\", "\u{29F5}"),
    ("/", "\u{2215}"),
    ("\u{2044}", "\u{2215}"),
    ("\u{FF0F}", "\u{2215}"),
    ("\"", "\u{FF02}"),
    ("`", "\u{FF02}"),
    ("\u{201C}", "\u{FF02}"),
    ("\u{201D}", "\u{FF02}"),
    ("\u{201E}", "\u{FF02}"),
    ("\u{201F}", "\u{FF02}"),
    ("\u{00AB}", "\u{FF02}"),
    ("\u{00BB}", "\u{FF02}"),
    ("'", "\u{2019}"),
    ("\u{2018}", "\u{2019}"),
    (":", "\u{02D0}"),
    ("*", "\u{2731}"),
    ("?", "\u{2047}"),
    ("<", "\u{276C}"),
    (">", "\u{276D}"),
    ("|", "\u{2502}"),
    ("&", "and"),
    ("$", "\u{FF04}"),
    ("!", "!"),
];

/// Characters whose runs of two or more collapse, with an optional alternate.
pub const COLLAPSE_CHARS: &[(char, Option<char>)] = &[
    ('-', Some(EM_DASH)),
    (EM_DASH, None),
    ('_', None),
    ('=', None),
    ('#', None),
    ('~', None),
];

/// Boundary characters that are not themselves replacement glyphs.
pub const BASE_BOUNDARY_CHARS: &[char] = &[
    ' ', '.', '-', ',', ';', '+', '\'', '\u{2018}', APOSTROPHE, '(', ')', '[', ']', '{', '}',
    '\u{00BF}', '\u{00A1}', EM_DASH, EN_DASH, ELLIPSIS,
];

pub const ASCII_OPENING_BRACKETS: &[char] = &['(', '[', '{', '<'];

pub const ASCII_CLOSING_BRACKETS: &[char] = &[')', ']', '}', '>'];

/// Capitalization triggers besides the opening brackets.
pub const BASE_TRIGGERS: &[char] = &['.', '-', EM_DASH, EN_DASH, ELLIPSIS, '\u{00BF}', '\u{00A1}'];

/// Source characters whose replacement glyph triggers capitalization.
pub const TRIGGER_SOURCES: &[&str] = &[":", "|", "..."];

/// Source characters whose replacement glyph may end a file name.
pub const ALLOWED_TRAILING_SOURCES: &[&str] = &["!", "$", "\"", "?", "'"];

/// Abbreviations in canonical case. Earlier entries win when two entries
/// share an upper-cased key.
pub const ABBREVIATIONS: &[&str] = &[
    // degrees
    "B.A", "B.S", "M.A", "M.B.A", "M.D", "M.S", "Ph.D", "J.D",
    // titles and suffixes
    "Dr", "Mr", "Mrs", "Ms", "Prof", "Rev", "Hon", "Sr", "Sra", "Srta", "Asst", "VP", "EVP",
    "SVP", "Jr", "II", "III", "IV",
    // military
    "Cpl", "Sgt", "Lt", "Capt", "Col", "Gen", "Maj", "Adm", "Cmdr", "Brig", "USMC", "USN",
    "USAF", "USA",
    // ratings
    "TV", "G", "PG", "R",
    // networks
    "ABC", "BBC", "CBS", "CNN", "CW", "HBO", "NBC", "PBS", "TBS", "TNT", "ESPN", "MTV", "TLC",
    "AMC",
    // US states
    "AK", "AL", "AR", "AZ", "CA", "CO", "CT", "DC", "DE", "FL", "GA", "HI", "ID", "IL", "KS",
    "KY", "LA", "MA", "MD", "ME", "MI", "MN", "MO", "MS", "MT", "NC", "ND", "NE", "NH", "NJ",
    "NM", "NV", "NY", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VA", "VT",
    "WA", "WI", "WV", "WY",
    // Canadian provinces
    "AB", "BC", "MB", "NB", "NL", "NS", "NT", "NU", "PE", "QC", "SK", "YT",
    // countries
    "UK", "US", "EU", "UAE", "USSR",
    // time zones
    "EST", "EDT", "CST", "CDT", "MST", "MDT", "PST", "PDT", "GMT", "UTC",
    // agencies
    "CIA", "DEA", "DHS", "DMV", "DOD", "DOE", "DOJ", "FBI", "FCC", "FDA", "FEMA", "FTC", "IRS",
    "NASA", "NOAA", "NSA", "TSA", "USDA", "EPA", "SSA", "UN", "USPS",
    // Mexican states
    "AGS", "BCS", "CHIS", "CHIH", "COAH", "CDMX", "DGO", "GTO", "GRO", "HGO", "JAL", "MEX",
    "MICH", "NAY", "OAX", "PUE", "QRO", "QROO", "SLP", "TAMPS", "TLAX", "YUC", "ZAC",
    // systems
    "DOS", "NTFS", "FAT32", "exFAT",
    // technology
    "CD", "DVD", "GB", "HD", "HDMI", "VGA", "HTML", "HTTP", "HTTPS", "IP", "ISO", "KB", "MB",
    "MP3", "MP4", "MPEG", "PDF", "RAM", "ROM", "SQL", "TB", "USB", "VHS", "XML", "JSON", "PHP",
    "CPU", "GPU", "SSD", "HDD", "NVMe", "SATA", "RAID", "LAN", "WAN", "DNS", "FTP", "SSH",
    "SSL", "TLS", "URL", "URI", "API", "SDK", "IDE", "GUI", "CLI", "CSS", "RSS", "UPC", "UPS",
    "QR", "AI", "ML",
    // media
    "JPEG", "JPG", "PNG", "GIF", "BMP", "TIF", "TIFF", "SVG", "WebP", "AVI", "MKV", "MOV",
    "WMV", "FLV", "WebM", "M4V", "VOB", "WAV", "AAC", "OGG", "FLAC", "WMA", "M4A", "4K", "8K",
    "HDR", "DTS", "IMAX", "UHD",
    // medical
    "DNA", "RNA", "CRISPR", "CPAP", "BiPAP", "HIV", "CDC", "MRI", "CT", "EKG", "ECG", "ICU",
    // business
    "CEO", "CFO", "CIO", "COO", "CTO", "LLC", "LLP", "vs",
    // other
    "PC", "PO", "PS", "UFO", "VIP", "DIY", "FAQ", "ASAP",
    // software
    "WordPress", "iOS", "macOS", "NoSQL", "MySQL",
];

/// Codes that collide with ordinary words or names. They stay upper case
/// only when written entirely in capitals.
pub const KEEP_CAPITALIZED_IF_ALL_CAPS: &[&str] = &[
    "AL", "CO", "DE", "HI", "ID", "IN", "LA", "MA", "ME", "OH", "OK", "ON", "OR", "PA", "US",
    "DOE", "DOS",
];

/// Month names (English and Spanish) with their display form.
pub const MONTHS: &[(&str, &str)] = &[
    ("january", "January"),
    ("february", "February"),
    ("march", "March"),
    ("april", "April"),
    ("may", "May"),
    ("june", "June"),
    ("july", "July"),
    ("august", "August"),
    ("september", "September"),
    ("october", "October"),
    ("november", "November"),
    ("december", "December"),
    ("jan", "Jan"),
    ("feb", "Feb"),
    ("mar", "Mar"),
    ("apr", "Apr"),
    ("jun", "Jun"),
    ("jul", "Jul"),
    ("aug", "Aug"),
    ("sep", "Sep"),
    ("sept", "Sept"),
    ("oct", "Oct"),
    ("nov", "Nov"),
    ("dec", "Dec"),
    ("enero", "Enero"),
    ("febrero", "Febrero"),
    ("marzo", "Marzo"),
    ("abril", "Abril"),
    ("mayo", "Mayo"),
    ("junio", "Junio"),
    ("julio", "Julio"),
    ("agosto", "Agosto"),
    ("septiembre", "Septiembre"),
    ("octubre", "Octubre"),
    ("noviembre", "Noviembre"),
    ("diciembre", "Diciembre"),
    ("ene", "Ene"),
    ("abr", "Abr"),
    ("ago", "Ago"),
    ("dic", "Dic"),
];

/// Suffixes that follow an apostrophe in contractions and possessives.
pub const CONTRACTIONS: &[&str] = &["ll", "s", "t", "re", "ve", "d", "m", "em", "til", "n", "cause"];

/// Words kept lower case inside a title.
pub const LOWERCASE_WORDS: &[&str] = &[
    // articles, conjunctions, prepositions
    "a", "an", "the", "and", "but", "for", "nor", "or", "so", "yet", "at", "by", "down", "from",
    "in", "into", "like", "near", "of", "off", "on", "onto", "out", "over", "past", "to", "up",
    "upon", "with", "as", "if", "how", "than", "v", "vs", "part", "vol", "feat", "ft", "remix",
    // forms of "to be"
    "am", "are", "is", "was", "were", "be", "been", "being",
    // Spanish
    "el", "la", "los", "las", "un", "una", "unos", "unas", "de", "del", "al", "y", "e", "o",
    "u", "en", "con", "por", "para",
];

/// Product and brand names with fixed internal capitalization.
pub const SPECIAL_CASE_WORDS: &[&str] = &[
    "iPad", "iPhone", "iPod", "iTunes", "iMac", "macOS", "iOS", "MySQL", "NoSQL", "PostgreSQL",
    "JavaScript", "TypeScript", "WordPress",
];

/// Common misspellings and their display form.
pub const MISSPELLINGS: &[(&str, &str)] = &[("wifi", "Wi-Fi"), ("ebook", "eBook")];

/// Units that may appear without a number.
pub const STANDALONE_UNITS: &[&str] = &["hr", "h", "min", "s", "sec", "d", "wk", "mo", "yr", "sq", "sqm"];

/// Extensions whose base names keep their original case (source code and
/// configuration files).
pub const PRESERVE_CASE_EXTENSIONS: &[&str] = &[
    "html", "htm", "css", "js", "jsx", "ts", "tsx", "vue", "php", "py", "ipynb", "java", "c",
    "cpp", "h", "hpp", "cs", "go", "rs", "rb", "pl", "sh", "bash", "ini", "conf", "cfg", "env",
    "make", "cmake", "gradle", "pom", "toml",
];

/// Extensions recognized when recovering an extension after cleanup.
pub const KNOWN_EXTENSIONS: &[&str] = &[
    "txt", "rtf", "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "odt", "ods", "odp", "md",
    "csv", "log", "jpg", "jpeg", "png", "gif", "bmp", "tiff", "webp", "svg", "mp3", "wav", "ogg",
    "flac", "m4a", "wma", "mp4", "avi", "mkv", "mov", "wmv", "flv", "webm", "m4v", "zip", "rar",
    "tar", "gz", "7z", "db", "sqlite", "mdb", "eml", "msg", "ttf", "otf", "woff", "woff2",
];

/// Terms that always survive verbatim.
pub const PRESERVED_TERMS: &[&str] = &["e.g.", "i.e.", "YouTube", "LinkedIn", "PowerPoint", "AC/DC"];
