pub const BASE_TITLE: &str = "SUNPUMP TRACKER";
pub const SUBTITLE: &str = "TRON MAINNET // CHAIN ID: 728126428";
pub const NETWORK: &str = "SUNPUMP";

// (name, symbol) pairs. Both fields of a token always come from one entry.
pub const TOKEN_TABLE: [(&str, &str); 20] = [
    ("PEPE TRON", "PTRX"),
    ("SunDoge", "SDOGE"),
    ("TronMoon", "TMOON"),
    ("JustinCoin", "JST2"),
    ("SunPepe", "SPEPE"),
    ("TRXElonMusk", "TRELON"),
    ("BONKTRON", "BONKT"),
    ("WIFTRON", "WIFT"),
    ("TronCat", "TCAT"),
    ("MoonTRX", "MTRX"),
    ("SunShiba", "SSHIB"),
    ("TronFrog", "TFROG"),
    ("BRETTRON", "BRETT"),
    ("ANDYTRON", "ANDY"),
    ("WOJAKTRON", "WOJAK"),
    ("POPCAT TRX", "POPT"),
    ("GIGACHAD TRX", "GIGA"),
    ("MOODENG TRX", "MDENG"),
    ("GOATTRON", "GOAT"),
    ("NEIROTRON", "NEIRO"),
];

pub const SUPPLIES: [&str; 5] = [
    "1000000000",
    "420690000000",
    "69420000000",
    "1000000000000",
    "777777777777",
];

pub const ADDRESS_PREFIX: char = 'T';
pub const ADDRESS_LEN: usize = 34;
pub const ADDRESS_ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789abcdefghijklmnopqrstuvwxyz";

pub const ID_LEN: usize = 9;
pub const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

pub const GLITCH_CHARS: &[u8] = b"!@#$%^&*()_+-=[]{}|;:,.<>?/~`";
pub const GLITCH_PROBABILITY: f64 = 0.1;

pub const ACTIVE_PROBABILITY: f64 = 0.1;
pub const SEED_WINDOW_MS: i64 = 3_600_000;

pub const DEFAULT_MAX_TOKENS: usize = 50;
pub const DEFAULT_SEED_COUNT: usize = 8;
pub const DEFAULT_MIN_INTERVAL_MS: u64 = 3_000;
pub const DEFAULT_MAX_INTERVAL_MS: u64 = 8_000;
pub const DEFAULT_FLASH_MS: u64 = 2_000;
pub const DEFAULT_GLITCH_INTERVAL_MS: u64 = 3_000;
pub const DEFAULT_GLITCH_REVERT_MS: u64 = 100;
pub const DEFAULT_TICK_RATE_MS: u64 = 250;
