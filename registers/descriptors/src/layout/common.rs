// Licensed under the Apache-2.0 license

//! Layouts shared across families.

use super::{BitSlot, NamedValue, RegisterField, RegisterLayout};

const PINS: &[BitSlot] = &[
    bit!("PIN0", 0),
    bit!("PIN1", 1),
    bit!("PIN2", 2),
    bit!("PIN3", 3),
    bit!("PIN4", 4),
    bit!("PIN5", 5),
    bit!("PIN6", 6),
    bit!("PIN7", 7),
];

static GPIO: &[RegisterField] = &[
    reg!("ODR", 0x00, ReadWrite, 0x00, "Port output data register", PINS),
    reg!("IDR", 0x01, ReadOnly, 0x00, "Port input pin value register", PINS),
    reg!("DDR", 0x02, ReadWrite, 0x00, "Port data direction register", PINS),
    reg!("CR1", 0x03, ReadWrite, 0x00, "Port control register 1", PINS),
    reg!("CR2", 0x04, ReadWrite, 0x00, "Port control register 2", PINS),
];

pub(crate) fn gpio() -> RegisterLayout {
    RegisterLayout::new("GPIO", GPIO, &[], &[])
}

static IWDG: &[RegisterField] = &[
    reg!("KR", 0x00, WriteOnly, 0x00, "IWDG key register"),
    reg!(
        "PR",
        0x01,
        ReadWrite,
        0x00,
        "IWDG prescaler register",
        &[bits!("PRE", 0, 3), res!(3, 5)]
    ),
    reg!("RLR", 0x02, NoBitAccess, 0xFF, "IWDG reload register"),
];

static IWDG_KEYS: &[NamedValue] = &[
    value!("KR", "KEY_ENABLE", 0xCC),
    value!("KR", "KEY_REFRESH", 0xAA),
    value!("KR", "KEY_ACCESS", 0x55),
];

pub(crate) fn iwdg() -> RegisterLayout {
    RegisterLayout::new("IWDG", IWDG, &[], IWDG_KEYS)
}

static WWDG: &[RegisterField] = &[
    reg!(
        "CR",
        0x00,
        ReadWrite,
        0x7F,
        "WWDG control register",
        &[bits!("T", 0, 7), bit!("WDGA", 7)]
    ),
    reg!(
        "WR",
        0x01,
        ReadWrite,
        0x7F,
        "WWDG window register",
        &[bits!("W", 0, 7), res!(7, 1)]
    ),
];

pub(crate) fn wwdg() -> RegisterLayout {
    RegisterLayout::new("WWDG", WWDG, &[], &[])
}

static AWU: &[RegisterField] = &[
    reg!(
        "CSR",
        0x00,
        ReadWrite,
        0x00,
        "AWU control/status register",
        &[
            bit!("MSR", 0),
            res!(1, 3),
            bit!("AWUEN", 4),
            bit!("AWUF", 5),
            res!(6, 2),
        ]
    ),
    reg!(
        "APR",
        0x01,
        ReadWrite,
        0x3F,
        "AWU asynchronous prescaler buffer register",
        &[bits!("APRE", 0, 6), res!(6, 2)]
    ),
    reg!(
        "TBR",
        0x02,
        ReadWrite,
        0x00,
        "AWU timebase selection register",
        &[bits!("AWUTB", 0, 4), res!(4, 4)]
    ),
];

pub(crate) fn awu() -> RegisterLayout {
    RegisterLayout::new("AWU", AWU, &[], &[])
}

static BEEP: &[RegisterField] = &[reg!(
    "CSR",
    0x00,
    ReadWrite,
    0x1F,
    "BEEP control/status register",
    &[bits!("BEEPDIV", 0, 5), bit!("BEEPEN", 5), bits!("BEEPSEL", 6, 2)]
)];

pub(crate) fn beep() -> RegisterLayout {
    RegisterLayout::new("BEEP", BEEP, &[], &[])
}

static CFG: &[RegisterField] = &[reg!(
    "GCR",
    0x00,
    ReadWrite,
    0x00,
    "Global configuration register",
    &[bit!("SWD", 0), bit!("AL", 1), res!(2, 6)]
)];

pub(crate) fn cfg() -> RegisterLayout {
    RegisterLayout::new("CFG", CFG, &[], &[])
}

const I2C_CR1: RegisterField = reg!(
    "CR1",
    0x00,
    ReadWrite,
    0x00,
    "I2C control register 1",
    &[bit!("PE", 0), res!(1, 5), bit!("ENGC", 6), bit!("NOSTRETCH", 7)]
);
const I2C_CR2: RegisterField = reg!(
    "CR2",
    0x01,
    ReadWrite,
    0x00,
    "I2C control register 2",
    &[
        bit!("START", 0),
        bit!("STOP", 1),
        bit!("ACK", 2),
        bit!("POS", 3),
        res!(4, 3),
        bit!("SWRST", 7),
    ]
);
const I2C_FREQR: RegisterField = reg!(
    "FREQR",
    0x02,
    ReadWrite,
    0x00,
    "I2C frequency register",
    &[bits!("FREQ", 0, 6), res!(6, 2)]
);
const I2C_OARL: RegisterField = reg!(
    "OARL",
    0x03,
    ReadWrite,
    0x00,
    "I2C own address register low",
    &[bit!("ADD0", 0), bits!("ADD", 1, 7)]
);
const I2C_OARH: RegisterField = reg!(
    "OARH",
    0x04,
    ReadWrite,
    0x00,
    "I2C own address register high",
    &[
        res!(0, 1),
        bits!("ADD", 1, 2),
        res!(3, 3),
        bit!("ADDCONF", 6),
        bit!("ADDMODE", 7),
    ]
);
const I2C_DR: RegisterField = reg!("DR", 0x06, NoBitAccess, 0x00, "I2C data register");
const I2C_SR1: RegisterField = reg!(
    "SR1",
    0x07,
    ReadOnly,
    0x00,
    "I2C status register 1",
    &[
        bit!("SB", 0),
        bit!("ADDR", 1),
        bit!("BTF", 2),
        bit!("ADD10", 3),
        bit!("STOPF", 4),
        res!(5, 1),
        bit!("RXNE", 6),
        bit!("TXE", 7),
    ]
);
const I2C_SR2: RegisterField = reg!(
    "SR2",
    0x08,
    ReadWrite,
    0x00,
    "I2C status register 2",
    &[
        bit!("BERR", 0),
        bit!("ARLO", 1),
        bit!("AF", 2),
        bit!("OVR", 3),
        res!(4, 1),
        bit!("WUFH", 5),
        res!(6, 2),
    ]
);
const I2C_ITR: RegisterField = reg!(
    "ITR",
    0x0A,
    ReadWrite,
    0x00,
    "I2C interrupt control register",
    &[
        bit!("ITERREN", 0),
        bit!("ITEVTEN", 1),
        bit!("ITBUFEN", 2),
        res!(3, 5),
    ]
);
const I2C_CCRL: RegisterField = reg!("CCRL", 0x0B, NoBitAccess, 0x00, "I2C clock control register low");
const I2C_CCRH: RegisterField = reg!(
    "CCRH",
    0x0C,
    ReadWrite,
    0x00,
    "I2C clock control register high",
    &[bits!("CCR", 0, 4), res!(4, 2), bit!("DUTY", 6), bit!("FS", 7)]
);
const I2C_TRISER: RegisterField = reg!(
    "TRISER",
    0x0D,
    ReadWrite,
    0x02,
    "I2C TRISE register",
    &[bits!("TRISE", 0, 6), res!(6, 2)]
);

static I2C_S: &[RegisterField] = &[
    I2C_CR1,
    I2C_CR2,
    I2C_FREQR,
    I2C_OARL,
    I2C_OARH,
    I2C_DR,
    I2C_SR1,
    I2C_SR2,
    reg!(
        "SR3",
        0x09,
        ReadOnly,
        0x00,
        "I2C status register 3",
        &[
            bit!("MSL", 0),
            bit!("BUSY", 1),
            bit!("TRA", 2),
            res!(3, 1),
            bit!("GENCALL", 4),
            res!(5, 3),
        ]
    ),
    I2C_ITR,
    I2C_CCRL,
    I2C_CCRH,
    I2C_TRISER,
];

static I2C_L: &[RegisterField] = &[
    I2C_CR1,
    I2C_CR2,
    I2C_FREQR,
    I2C_OARL,
    I2C_OARH,
    I2C_DR,
    I2C_SR1,
    I2C_SR2,
    reg!(
        "SR3",
        0x09,
        ReadOnly,
        0x00,
        "I2C status register 3",
        &[
            bit!("MSL", 0),
            bit!("BUSY", 1),
            bit!("TRA", 2),
            res!(3, 1),
            bit!("GENCALL", 4),
            res!(5, 2),
            bit!("DUALF", 7),
        ]
    ),
    I2C_ITR,
    I2C_CCRL,
    I2C_CCRH,
    I2C_TRISER,
];

pub(crate) fn i2c_stm8s() -> RegisterLayout {
    RegisterLayout::new("I2C", I2C_S, &[], &[])
}

pub(crate) fn i2c_stm8l() -> RegisterLayout {
    RegisterLayout::new("I2C", I2C_L, &[], &[])
}

/// Output-compare view of a CCMR register on the general purpose timers.
/// `no_fe` and `no_ce` mark timers without the fast-enable or clear-enable bit.
macro_rules! oc_view {
    (no_fe, $pe:literal, $m:literal, no_ce) => {
        &[res!(2, 1), bit!($pe, 3), bits!($m, 4, 3), res!(7, 1)]
    };
    (no_fe, $pe:literal, $m:literal, $ce:literal) => {
        &[res!(2, 1), bit!($pe, 3), bits!($m, 4, 3), bit!($ce, 7)]
    };
    ($fe:literal, $pe:literal, $m:literal, no_ce) => {
        &[bit!($fe, 2), bit!($pe, 3), bits!($m, 4, 3), res!(7, 1)]
    };
    ($fe:literal, $pe:literal, $m:literal, $ce:literal) => {
        &[bit!($fe, 2), bit!($pe, 3), bits!($m, 4, 3), bit!($ce, 7)]
    };
}

/// Input-capture view of a CCMR register.
macro_rules! ic_view {
    ($psc:literal, $f:literal) => {
        &[bits!($psc, 2, 2), bits!($f, 4, 4)]
    };
}
