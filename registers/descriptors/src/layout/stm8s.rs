// Licensed under the Apache-2.0 license

//! Register layouts of the STM8S and STM8AF lines.

use super::{common, NamedValue, RegisterField, RegisterLayout, WordPair};
use crate::family::{AfsKind, AfsLine, PeripheralKind};

static FLASH: &[RegisterField] = &[
    reg!(
        "CR1",
        0x00,
        ReadWrite,
        0x00,
        "Flash control register 1",
        &[
            bit!("FIX", 0),
            bit!("IE", 1),
            bit!("AHALT", 2),
            bit!("HALT", 3),
            res!(4, 4),
        ]
    ),
    reg!(
        "CR2",
        0x01,
        ReadWrite,
        0x00,
        "Flash control register 2",
        &[
            bit!("PRG", 0),
            res!(1, 3),
            bit!("FPRG", 4),
            bit!("ERASE", 5),
            bit!("WPRG", 6),
            bit!("OPT", 7),
        ]
    ),
    reg!(
        "NCR2",
        0x02,
        ReadWrite,
        0xFF,
        "Flash complementary control register 2",
        &[
            bit!("NPRG", 0),
            res!(1, 3),
            bit!("NFPRG", 4),
            bit!("NERASE", 5),
            bit!("NWPRG", 6),
            bit!("NOPT", 7),
        ]
    ),
    reg!(
        "FPR",
        0x03,
        ReadWrite,
        0x00,
        "Flash protection register",
        &[bits!("WPB", 0, 6), res!(6, 2)]
    ),
    reg!(
        "NFPR",
        0x04,
        ReadWrite,
        0xFF,
        "Flash complementary protection register",
        &[bits!("NWPB", 0, 6), res!(6, 2)]
    ),
    reg!(
        "IAPSR",
        0x05,
        ReadWrite,
        0x40,
        "Flash in-application programming status register",
        &[
            bit!("WR_PG_DIS", 0),
            bit!("PUL", 1),
            bit!("EOP", 2),
            bit!("DUL", 3),
            res!(4, 2),
            bit!("HVOFF", 6),
            res!(7, 1),
        ]
    ),
    reg!("PUKR", 0x08, WriteOnly, 0x00, "Flash program memory unprotection register"),
    reg!("DUKR", 0x0A, WriteOnly, 0x00, "Data EEPROM unprotection register"),
];

static FLASH_KEYS: &[NamedValue] = &[
    value!("PUKR", "PUKR_KEY1", 0x56),
    value!("PUKR", "PUKR_KEY2", 0xAE),
    value!("DUKR", "DUKR_KEY1", 0xAE),
    value!("DUKR", "DUKR_KEY2", 0x56),
];

static EXTI: &[RegisterField] = &[
    reg!(
        "CR1",
        0x00,
        ReadWrite,
        0x00,
        "External interrupt control register 1",
        &[
            bits!("PAIS", 0, 2),
            bits!("PBIS", 2, 2),
            bits!("PCIS", 4, 2),
            bits!("PDIS", 6, 2),
        ]
    ),
    reg!(
        "CR2",
        0x01,
        ReadWrite,
        0x00,
        "External interrupt control register 2",
        &[bits!("PEIS", 0, 2), bit!("TLIS", 2), res!(3, 5)]
    ),
];

static RST: &[RegisterField] = &[reg!(
    "SR",
    0x00,
    ReadWrite,
    0x00,
    "Reset status register",
    &[
        bit!("WWDGF", 0),
        bit!("IWDGF", 1),
        bit!("ILLOPF", 2),
        bit!("SWIMF", 3),
        bit!("EMCF", 4),
        res!(5, 3),
    ]
)];

static CLK: &[RegisterField] = &[
    reg!(
        "ICKR",
        0x00,
        ReadWrite,
        0x01,
        "Internal clock register",
        &[
            bit!("HSIEN", 0),
            bit!("HSIRDY", 1),
            bit!("FHWU", 2),
            bit!("LSIEN", 3),
            bit!("LSIRDY", 4),
            bit!("REGAH", 5),
            res!(6, 2),
        ]
    ),
    reg!(
        "ECKR",
        0x01,
        ReadWrite,
        0x00,
        "External clock register",
        &[bit!("HSEEN", 0), bit!("HSERDY", 1), res!(2, 6)]
    ),
    reg!("CMSR", 0x03, ReadOnly, 0xE1, "Clock master status register"),
    reg!("SWR", 0x04, NoBitAccess, 0xE1, "Clock master switch register"),
    reg!(
        "SWCR",
        0x05,
        ReadWrite,
        0x00,
        "Switch control register",
        &[
            bit!("SWBSY", 0),
            bit!("SWEN", 1),
            bit!("SWIEN", 2),
            bit!("SWIF", 3),
            res!(4, 4),
        ]
    ),
    reg!(
        "CKDIVR",
        0x06,
        ReadWrite,
        0x18,
        "Clock divider register",
        &[bits!("CPUDIV", 0, 3), bits!("HSIDIV", 3, 2), res!(5, 3)]
    ),
    reg!(
        "PCKENR1",
        0x07,
        ReadWrite,
        0xFF,
        "Peripheral clock gating register 1",
        &[
            bit!("I2C", 0),
            bit!("SPI", 1),
            bit!("UART1", 2),
            bit!("UART2", 3),
            bit!("TIM4_TIM6", 4),
            bit!("TIM2_TIM5", 5),
            bit!("TIM3", 6),
            bit!("TIM1", 7),
        ]
    ),
    reg!(
        "CSSR",
        0x08,
        ReadWrite,
        0x00,
        "Clock security system register",
        &[
            bit!("CSSEN", 0),
            bit!("AUX", 1),
            bit!("CSSDIE", 2),
            bit!("CSSD", 3),
            res!(4, 4),
        ]
    ),
    reg!(
        "CCOR",
        0x09,
        ReadWrite,
        0x00,
        "Configurable clock output register",
        &[
            bit!("CCOEN", 0),
            bits!("CCOSEL", 1, 4),
            bit!("CCORDY", 5),
            bit!("CCOBSY", 6),
            res!(7, 1),
        ]
    ),
    reg!(
        "PCKENR2",
        0x0A,
        ReadWrite,
        0xFF,
        "Peripheral clock gating register 2",
        &[
            res!(0, 2),
            bit!("AWU", 2),
            bit!("ADC", 3),
            res!(4, 3),
            bit!("CAN", 7),
        ]
    ),
    reg!(
        "HSITRIMR",
        0x0C,
        ReadWrite,
        0x00,
        "HSI clock calibration trimming register",
        &[bits!("HSITRIM", 0, 4), res!(4, 4)]
    ),
    reg!(
        "SWIMCCR",
        0x0D,
        ReadWrite,
        0x00,
        "SWIM clock control register",
        &[bit!("SWIMCLK", 0), res!(1, 7)]
    ),
];

static CLK_SOURCES: &[NamedValue] = &[
    value!("SWR", "SWI_HSI", 0xE1),
    value!("SWR", "SWI_LSI", 0xD2),
    value!("SWR", "SWI_HSE", 0xB4),
];

static SPI: &[RegisterField] = &[
    reg!(
        "CR1",
        0x00,
        ReadWrite,
        0x00,
        "SPI control register 1",
        &[
            bit!("CPHA", 0),
            bit!("CPOL", 1),
            bit!("MSTR", 2),
            bits!("BR", 3, 3),
            bit!("SPE", 6),
            bit!("LSBFIRST", 7),
        ]
    ),
    reg!(
        "CR2",
        0x01,
        ReadWrite,
        0x00,
        "SPI control register 2",
        &[
            bit!("SSI", 0),
            bit!("SSM", 1),
            bit!("RXONLY", 2),
            res!(3, 1),
            bit!("CRCNEXT", 4),
            bit!("CRCEN", 5),
            bit!("BDOE", 6),
            bit!("BDM", 7),
        ]
    ),
    reg!(
        "ICR",
        0x02,
        ReadWrite,
        0x00,
        "SPI interrupt control register",
        &[
            res!(0, 4),
            bit!("WKIE", 4),
            bit!("ERRIE", 5),
            bit!("RXIE", 6),
            bit!("TXIE", 7),
        ]
    ),
    reg!(
        "SR",
        0x03,
        ReadWrite,
        0x02,
        "SPI status register",
        &[
            bit!("RXNE", 0),
            bit!("TXE", 1),
            res!(2, 1),
            bit!("WKUP", 3),
            bit!("CRCERR", 4),
            bit!("MODF", 5),
            bit!("OVR", 6),
            bit!("BSY", 7),
        ]
    ),
    reg!("DR", 0x04, NoBitAccess, 0x00, "SPI data register"),
    reg!("CRCPR", 0x05, NoBitAccess, 0x07, "SPI CRC polynomial register"),
    reg!("RXCRCR", 0x06, ReadOnly, 0x00, "SPI Rx CRC register"),
    reg!("TXCRCR", 0x07, ReadOnly, 0x00, "SPI Tx CRC register"),
];

const UART_SR: RegisterField = reg!(
    "SR",
    0x00,
    ReadWrite,
    0xC0,
    "UART status register",
    &[
        bit!("PE", 0),
        bit!("FE", 1),
        bit!("NF", 2),
        bit!("OR", 3),
        bit!("IDLE", 4),
        bit!("RXNE", 5),
        bit!("TC", 6),
        bit!("TXE", 7),
    ]
);
const UART_DR: RegisterField = reg!("DR", 0x01, NoBitAccess, 0x00, "UART data register");
const UART_BRR1: RegisterField =
    reg!("BRR1", 0x02, NoBitAccess, 0x00, "UART baud rate register 1, divider bits [11:4]");
const UART_BRR2: RegisterField = reg!(
    "BRR2",
    0x03,
    ReadWrite,
    0x00,
    "UART baud rate register 2",
    &[bits!("DIV_0_3", 0, 4), bits!("DIV_12_15", 4, 4)]
);
const UART_CR1: RegisterField = reg!(
    "CR1",
    0x04,
    ReadWrite,
    0x00,
    "UART control register 1",
    &[
        bit!("PIEN", 0),
        bit!("PS", 1),
        bit!("PCEN", 2),
        bit!("WAKE", 3),
        bit!("M", 4),
        bit!("UARTD", 5),
        bit!("T8", 6),
        bit!("R8", 7),
    ]
);
const UART_CR2: RegisterField = reg!(
    "CR2",
    0x05,
    ReadWrite,
    0x00,
    "UART control register 2",
    &[
        bit!("SBK", 0),
        bit!("RWU", 1),
        bit!("REN", 2),
        bit!("TEN", 3),
        bit!("ILIEN", 4),
        bit!("RIEN", 5),
        bit!("TCIEN", 6),
        bit!("TIEN", 7),
    ]
);
const UART_CR3: RegisterField = reg!(
    "CR3",
    0x06,
    ReadWrite,
    0x00,
    "UART control register 3",
    &[
        bit!("LBCL", 0),
        bit!("CPHA", 1),
        bit!("CPOL", 2),
        bit!("CKEN", 3),
        bits!("STOP", 4, 2),
        bit!("LINEN", 6),
        res!(7, 1),
    ]
);
const UART_CR4: RegisterField = reg!(
    "CR4",
    0x07,
    ReadWrite,
    0x00,
    "UART control register 4",
    &[
        bits!("ADD", 0, 4),
        bit!("LBDF", 4),
        bit!("LBDL", 5),
        bit!("LBDIEN", 6),
        res!(7, 1),
    ]
);
const UART_CR5: RegisterField = reg!(
    "CR5",
    0x08,
    ReadWrite,
    0x00,
    "UART control register 5",
    &[
        res!(0, 1),
        bit!("IREN", 1),
        bit!("IRLP", 2),
        bit!("HDSEL", 3),
        bit!("NACK", 4),
        bit!("SCEN", 5),
        res!(6, 2),
    ]
);
const UART_CR6: RegisterField = reg!(
    "CR6",
    0x09,
    ReadWrite,
    0x00,
    "UART control register 6",
    &[
        bit!("LSF", 0),
        bit!("LHDF", 1),
        bit!("LHDIEN", 2),
        res!(3, 1),
        bit!("LASE", 4),
        bit!("LSLV", 5),
        res!(6, 1),
        bit!("LDUM", 7),
    ]
);

static UART1: &[RegisterField] = &[
    UART_SR,
    UART_DR,
    UART_BRR1,
    UART_BRR2,
    UART_CR1,
    UART_CR2,
    UART_CR3,
    UART_CR4,
    UART_CR5,
    reg!("GTR", 0x09, NoBitAccess, 0x00, "UART guard time register"),
    reg!("PSCR", 0x0A, NoBitAccess, 0x00, "UART prescaler register"),
];

static UART2: &[RegisterField] = &[
    UART_SR,
    UART_DR,
    UART_BRR1,
    UART_BRR2,
    UART_CR1,
    UART_CR2,
    UART_CR3,
    UART_CR4,
    reg!(
        "CR5",
        0x08,
        ReadWrite,
        0x00,
        "UART control register 5",
        &[
            res!(0, 1),
            bit!("IREN", 1),
            bit!("IRLP", 2),
            res!(3, 1),
            bit!("NACK", 4),
            bit!("SCEN", 5),
            res!(6, 2),
        ]
    ),
    UART_CR6,
    reg!("GTR", 0x0A, NoBitAccess, 0x00, "UART guard time register"),
    reg!("PSCR", 0x0B, NoBitAccess, 0x00, "UART prescaler register"),
];

static UART3: &[RegisterField] = &[
    UART_SR,
    UART_DR,
    UART_BRR1,
    UART_BRR2,
    UART_CR1,
    UART_CR2,
    reg!(
        "CR3",
        0x06,
        ReadWrite,
        0x00,
        "UART control register 3",
        &[res!(0, 4), bits!("STOP", 4, 2), bit!("LINEN", 6), res!(7, 1)]
    ),
    UART_CR4,
    UART_CR6,
];

static UART4: &[RegisterField] = &[
    UART_SR,
    UART_DR,
    UART_BRR1,
    UART_BRR2,
    UART_CR1,
    UART_CR2,
    UART_CR3,
    UART_CR4,
    UART_CR5,
    UART_CR6,
    reg!("GTR", 0x0A, NoBitAccess, 0x00, "UART guard time register"),
    reg!("PSCR", 0x0B, NoBitAccess, 0x00, "UART prescaler register"),
];

static TIM1: &[RegisterField] = &[
    reg!(
        "CR1",
        0x00,
        ReadWrite,
        0x00,
        "TIM1 control register 1",
        &[
            bit!("CEN", 0),
            bit!("UDIS", 1),
            bit!("URS", 2),
            bit!("OPM", 3),
            bit!("DIR", 4),
            bits!("CMS", 5, 2),
            bit!("ARPE", 7),
        ]
    ),
    reg!(
        "CR2",
        0x01,
        ReadWrite,
        0x00,
        "TIM1 control register 2",
        &[
            bit!("CCPC", 0),
            res!(1, 1),
            bit!("COMS", 2),
            res!(3, 1),
            bits!("MMS", 4, 3),
            res!(7, 1),
        ]
    ),
    reg!(
        "SMCR",
        0x02,
        ReadWrite,
        0x00,
        "TIM1 slave mode control register",
        &[bits!("SMS", 0, 3), res!(3, 1), bits!("TS", 4, 3), bit!("MSM", 7)]
    ),
    reg!(
        "ETR",
        0x03,
        ReadWrite,
        0x00,
        "TIM1 external trigger register",
        &[
            bits!("ETF", 0, 4),
            bits!("ETPS", 4, 2),
            bit!("ECE", 6),
            bit!("ETP", 7),
        ]
    ),
    reg!(
        "IER",
        0x04,
        ReadWrite,
        0x00,
        "TIM1 interrupt enable register",
        &[
            bit!("UIE", 0),
            bit!("CC1IE", 1),
            bit!("CC2IE", 2),
            bit!("CC3IE", 3),
            bit!("CC4IE", 4),
            bit!("COMIE", 5),
            bit!("TIE", 6),
            bit!("BIE", 7),
        ]
    ),
    reg!(
        "SR1",
        0x05,
        ReadWrite,
        0x00,
        "TIM1 status register 1",
        &[
            bit!("UIF", 0),
            bit!("CC1IF", 1),
            bit!("CC2IF", 2),
            bit!("CC3IF", 3),
            bit!("CC4IF", 4),
            bit!("COMIF", 5),
            bit!("TIF", 6),
            bit!("BIF", 7),
        ]
    ),
    reg!(
        "SR2",
        0x06,
        ReadWrite,
        0x00,
        "TIM1 status register 2",
        &[
            res!(0, 1),
            bit!("CC1OF", 1),
            bit!("CC2OF", 2),
            bit!("CC3OF", 3),
            bit!("CC4OF", 4),
            res!(5, 3),
        ]
    ),
    reg!(
        "EGR",
        0x07,
        WriteOnly,
        0x00,
        "TIM1 event generation register",
        &[
            bit!("UG", 0),
            bit!("CC1G", 1),
            bit!("CC2G", 2),
            bit!("CC3G", 3),
            bit!("CC4G", 4),
            bit!("COMG", 5),
            bit!("TG", 6),
            bit!("BG", 7),
        ]
    ),
    ccmr!(
        "CCMR1",
        0x08,
        "TIM1 capture/compare mode register 1",
        "CC1S",
        oc_view!("OC1FE", "OC1PE", "OC1M", "OC1CE"),
        ic_view!("IC1PSC", "IC1F")
    ),
    ccmr!(
        "CCMR2",
        0x09,
        "TIM1 capture/compare mode register 2",
        "CC2S",
        oc_view!("OC2FE", "OC2PE", "OC2M", "OC2CE"),
        ic_view!("IC2PSC", "IC2F")
    ),
    ccmr!(
        "CCMR3",
        0x0A,
        "TIM1 capture/compare mode register 3",
        "CC3S",
        oc_view!("OC3FE", "OC3PE", "OC3M", "OC3CE"),
        ic_view!("IC3PSC", "IC3F")
    ),
    ccmr!(
        "CCMR4",
        0x0B,
        "TIM1 capture/compare mode register 4",
        "CC4S",
        oc_view!("OC4FE", "OC4PE", "OC4M", "OC4CE"),
        ic_view!("IC4PSC", "IC4F")
    ),
    reg!(
        "CCER1",
        0x0C,
        ReadWrite,
        0x00,
        "TIM1 capture/compare enable register 1",
        &[
            bit!("CC1E", 0),
            bit!("CC1P", 1),
            bit!("CC1NE", 2),
            bit!("CC1NP", 3),
            bit!("CC2E", 4),
            bit!("CC2P", 5),
            bit!("CC2NE", 6),
            bit!("CC2NP", 7),
        ]
    ),
    reg!(
        "CCER2",
        0x0D,
        ReadWrite,
        0x00,
        "TIM1 capture/compare enable register 2",
        &[
            bit!("CC3E", 0),
            bit!("CC3P", 1),
            bit!("CC3NE", 2),
            bit!("CC3NP", 3),
            bit!("CC4E", 4),
            bit!("CC4P", 5),
            res!(6, 2),
        ]
    ),
    reg!("CNTRH", 0x0E, NoBitAccess, 0x00, "TIM1 counter high"),
    reg!("CNTRL", 0x0F, NoBitAccess, 0x00, "TIM1 counter low"),
    reg!("PSCRH", 0x10, NoBitAccess, 0x00, "TIM1 prescaler register high"),
    reg!("PSCRL", 0x11, NoBitAccess, 0x00, "TIM1 prescaler register low"),
    reg!("ARRH", 0x12, NoBitAccess, 0xFF, "TIM1 auto-reload register high"),
    reg!("ARRL", 0x13, NoBitAccess, 0xFF, "TIM1 auto-reload register low"),
    reg!("RCR", 0x14, NoBitAccess, 0x00, "TIM1 repetition counter register"),
    reg!("CCR1H", 0x15, NoBitAccess, 0x00, "TIM1 capture/compare register 1 high"),
    reg!("CCR1L", 0x16, NoBitAccess, 0x00, "TIM1 capture/compare register 1 low"),
    reg!("CCR2H", 0x17, NoBitAccess, 0x00, "TIM1 capture/compare register 2 high"),
    reg!("CCR2L", 0x18, NoBitAccess, 0x00, "TIM1 capture/compare register 2 low"),
    reg!("CCR3H", 0x19, NoBitAccess, 0x00, "TIM1 capture/compare register 3 high"),
    reg!("CCR3L", 0x1A, NoBitAccess, 0x00, "TIM1 capture/compare register 3 low"),
    reg!("CCR4H", 0x1B, NoBitAccess, 0x00, "TIM1 capture/compare register 4 high"),
    reg!("CCR4L", 0x1C, NoBitAccess, 0x00, "TIM1 capture/compare register 4 low"),
    reg!(
        "BKR",
        0x1D,
        ReadWrite,
        0x00,
        "TIM1 break register",
        &[
            bits!("LOCK", 0, 2),
            bit!("OSSI", 2),
            bit!("OSSR", 3),
            bit!("BKE", 4),
            bit!("BKP", 5),
            bit!("AOE", 6),
            bit!("MOE", 7),
        ]
    ),
    reg!("DTR", 0x1E, NoBitAccess, 0x00, "TIM1 dead-time register"),
    reg!(
        "OISR",
        0x1F,
        ReadWrite,
        0x00,
        "TIM1 output idle state register",
        &[
            bit!("OIS1", 0),
            bit!("OIS1N", 1),
            bit!("OIS2", 2),
            bit!("OIS2N", 3),
            bit!("OIS3", 4),
            bit!("OIS3N", 5),
            bit!("OIS4", 6),
            res!(7, 1),
        ]
    ),
];

static TIM1_PAIRS: &[WordPair] = &[
    pair!("CNTR", "CNTRH", "CNTRL"),
    pair!("PSCR", "PSCRH", "PSCRL"),
    pair!("ARR", "ARRH", "ARRL"),
    pair!("CCR1", "CCR1H", "CCR1L"),
    pair!("CCR2", "CCR2H", "CCR2L"),
    pair!("CCR3", "CCR3H", "CCR3L"),
    pair!("CCR4", "CCR4H", "CCR4L"),
];

/// Control register 1 of the basic and general purpose timers.
const TIMX_CR1: RegisterField = reg!(
    "CR1",
    0x00,
    ReadWrite,
    0x00,
    "Control register 1",
    &[
        bit!("CEN", 0),
        bit!("UDIS", 1),
        bit!("URS", 2),
        bit!("OPM", 3),
        res!(4, 3),
        bit!("ARPE", 7),
    ]
);

static TIM2: &[RegisterField] = &[
    TIMX_CR1,
    reg!(
        "IER",
        0x01,
        ReadWrite,
        0x00,
        "TIM2 interrupt enable register",
        &[
            bit!("UIE", 0),
            bit!("CC1IE", 1),
            bit!("CC2IE", 2),
            bit!("CC3IE", 3),
            res!(4, 4),
        ]
    ),
    reg!(
        "SR1",
        0x02,
        ReadWrite,
        0x00,
        "TIM2 status register 1",
        &[
            bit!("UIF", 0),
            bit!("CC1IF", 1),
            bit!("CC2IF", 2),
            bit!("CC3IF", 3),
            res!(4, 4),
        ]
    ),
    reg!(
        "SR2",
        0x03,
        ReadWrite,
        0x00,
        "TIM2 status register 2",
        &[
            res!(0, 1),
            bit!("CC1OF", 1),
            bit!("CC2OF", 2),
            bit!("CC3OF", 3),
            res!(4, 4),
        ]
    ),
    reg!(
        "EGR",
        0x04,
        WriteOnly,
        0x00,
        "TIM2 event generation register",
        &[
            bit!("UG", 0),
            bit!("CC1G", 1),
            bit!("CC2G", 2),
            bit!("CC3G", 3),
            res!(4, 4),
        ]
    ),
    ccmr!(
        "CCMR1",
        0x05,
        "TIM2 capture/compare mode register 1",
        "CC1S",
        oc_view!(no_fe, "OC1PE", "OC1M", no_ce),
        ic_view!("IC1PSC", "IC1F")
    ),
    ccmr!(
        "CCMR2",
        0x06,
        "TIM2 capture/compare mode register 2",
        "CC2S",
        oc_view!(no_fe, "OC2PE", "OC2M", no_ce),
        ic_view!("IC2PSC", "IC2F")
    ),
    ccmr!(
        "CCMR3",
        0x07,
        "TIM2 capture/compare mode register 3",
        "CC3S",
        oc_view!(no_fe, "OC3PE", "OC3M", "OC3CE"),
        ic_view!("IC3PSC", "IC3F")
    ),
    reg!(
        "CCER1",
        0x08,
        ReadWrite,
        0x00,
        "TIM2 capture/compare enable register 1",
        &[
            bit!("CC1E", 0),
            bit!("CC1P", 1),
            res!(2, 2),
            bit!("CC2E", 4),
            bit!("CC2P", 5),
            res!(6, 2),
        ]
    ),
    reg!(
        "CCER2",
        0x09,
        ReadWrite,
        0x00,
        "TIM2 capture/compare enable register 2",
        &[bit!("CC3E", 0), bit!("CC3P", 1), res!(2, 6)]
    ),
    reg!("CNTRH", 0x0A, NoBitAccess, 0x00, "TIM2 counter high"),
    reg!("CNTRL", 0x0B, NoBitAccess, 0x00, "TIM2 counter low"),
    reg!(
        "PSCR",
        0x0C,
        ReadWrite,
        0x00,
        "TIM2 prescaler register",
        &[bits!("PSC", 0, 4), res!(4, 4)]
    ),
    reg!("ARRH", 0x0D, NoBitAccess, 0xFF, "TIM2 auto-reload register high"),
    reg!("ARRL", 0x0E, NoBitAccess, 0xFF, "TIM2 auto-reload register low"),
    reg!("CCR1H", 0x0F, NoBitAccess, 0x00, "TIM2 capture/compare register 1 high"),
    reg!("CCR1L", 0x10, NoBitAccess, 0x00, "TIM2 capture/compare register 1 low"),
    reg!("CCR2H", 0x11, NoBitAccess, 0x00, "TIM2 capture/compare register 2 high"),
    reg!("CCR2L", 0x12, NoBitAccess, 0x00, "TIM2 capture/compare register 2 low"),
    reg!("CCR3H", 0x13, NoBitAccess, 0x00, "TIM2 capture/compare register 3 high"),
    reg!("CCR3L", 0x14, NoBitAccess, 0x00, "TIM2 capture/compare register 3 low"),
];

static TIM2_PAIRS: &[WordPair] = &[
    pair!("CNTR", "CNTRH", "CNTRL"),
    pair!("ARR", "ARRH", "ARRL"),
    pair!("CCR1", "CCR1H", "CCR1L"),
    pair!("CCR2", "CCR2H", "CCR2L"),
    pair!("CCR3", "CCR3H", "CCR3L"),
];

static TIM3: &[RegisterField] = &[
    TIMX_CR1,
    reg!(
        "IER",
        0x01,
        ReadWrite,
        0x00,
        "TIM3 interrupt enable register",
        &[bit!("UIE", 0), bit!("CC1IE", 1), bit!("CC2IE", 2), res!(3, 5)]
    ),
    reg!(
        "SR1",
        0x02,
        ReadWrite,
        0x00,
        "TIM3 status register 1",
        &[bit!("UIF", 0), bit!("CC1IF", 1), bit!("CC2IF", 2), res!(3, 5)]
    ),
    reg!(
        "SR2",
        0x03,
        ReadWrite,
        0x00,
        "TIM3 status register 2",
        &[res!(0, 1), bit!("CC1OF", 1), bit!("CC2OF", 2), res!(3, 5)]
    ),
    reg!(
        "EGR",
        0x04,
        WriteOnly,
        0x00,
        "TIM3 event generation register",
        &[bit!("UG", 0), bit!("CC1G", 1), bit!("CC2G", 2), res!(3, 5)]
    ),
    ccmr!(
        "CCMR1",
        0x05,
        "TIM3 capture/compare mode register 1",
        "CC1S",
        oc_view!(no_fe, "OC1PE", "OC1M", no_ce),
        ic_view!("IC1PSC", "IC1F")
    ),
    ccmr!(
        "CCMR2",
        0x06,
        "TIM3 capture/compare mode register 2",
        "CC2S",
        oc_view!(no_fe, "OC2PE", "OC2M", no_ce),
        ic_view!("IC2PSC", "IC2F")
    ),
    reg!(
        "CCER1",
        0x08,
        ReadWrite,
        0x00,
        "TIM3 capture/compare enable register 1",
        &[
            bit!("CC1E", 0),
            bit!("CC1P", 1),
            res!(2, 2),
            bit!("CC2E", 4),
            bit!("CC2P", 5),
            res!(6, 2),
        ]
    ),
    reg!("CNTRH", 0x0A, NoBitAccess, 0x00, "TIM3 counter high"),
    reg!("CNTRL", 0x0B, NoBitAccess, 0x00, "TIM3 counter low"),
    reg!(
        "PSCR",
        0x0C,
        ReadWrite,
        0x00,
        "TIM3 prescaler register",
        &[bits!("PSC", 0, 4), res!(4, 4)]
    ),
    reg!("ARRH", 0x0D, NoBitAccess, 0xFF, "TIM3 auto-reload register high"),
    reg!("ARRL", 0x0E, NoBitAccess, 0xFF, "TIM3 auto-reload register low"),
    reg!("CCR1H", 0x0F, NoBitAccess, 0x00, "TIM3 capture/compare register 1 high"),
    reg!("CCR1L", 0x10, NoBitAccess, 0x00, "TIM3 capture/compare register 1 low"),
    reg!("CCR2H", 0x11, NoBitAccess, 0x00, "TIM3 capture/compare register 2 high"),
    reg!("CCR2L", 0x12, NoBitAccess, 0x00, "TIM3 capture/compare register 2 low"),
];

static TIM3_PAIRS: &[WordPair] = &[
    pair!("CNTR", "CNTRH", "CNTRL"),
    pair!("ARR", "ARRH", "ARRL"),
    pair!("CCR1", "CCR1H", "CCR1L"),
    pair!("CCR2", "CCR2H", "CCR2L"),
];

static TIM4: &[RegisterField] = &[
    TIMX_CR1,
    reg!(
        "IER",
        0x01,
        ReadWrite,
        0x00,
        "TIM4 interrupt enable register",
        &[bit!("UIE", 0), res!(1, 7)]
    ),
    reg!(
        "SR",
        0x02,
        ReadWrite,
        0x00,
        "TIM4 status register",
        &[bit!("UIF", 0), res!(1, 7)]
    ),
    reg!(
        "EGR",
        0x03,
        WriteOnly,
        0x00,
        "TIM4 event generation register",
        &[bit!("UG", 0), res!(1, 7)]
    ),
    reg!("CNTR", 0x04, NoBitAccess, 0x00, "TIM4 counter"),
    reg!(
        "PSCR",
        0x05,
        ReadWrite,
        0x00,
        "TIM4 prescaler register",
        &[bits!("PSC", 0, 3), res!(3, 5)]
    ),
    reg!("ARR", 0x06, NoBitAccess, 0xFF, "TIM4 auto-reload register"),
];

static TIM5: &[RegisterField] = &[
    TIMX_CR1,
    reg!(
        "CR2",
        0x01,
        ReadWrite,
        0x00,
        "TIM5 control register 2",
        &[
            bit!("CCPC", 0),
            res!(1, 1),
            bit!("COMS", 2),
            res!(3, 1),
            bits!("MMS", 4, 3),
            res!(7, 1),
        ]
    ),
    reg!(
        "SMCR",
        0x02,
        ReadWrite,
        0x00,
        "TIM5 slave mode control register",
        &[bits!("SMS", 0, 3), res!(3, 1), bits!("TS", 4, 3), bit!("MSM", 7)]
    ),
    reg!(
        "IER",
        0x03,
        ReadWrite,
        0x00,
        "TIM5 interrupt enable register",
        &[
            bit!("UIE", 0),
            bit!("CC1IE", 1),
            bit!("CC2IE", 2),
            bit!("CC3IE", 3),
            res!(4, 2),
            bit!("TIE", 6),
            res!(7, 1),
        ]
    ),
    reg!(
        "SR1",
        0x04,
        ReadWrite,
        0x00,
        "TIM5 status register 1",
        &[
            bit!("UIF", 0),
            bit!("CC1IF", 1),
            bit!("CC2IF", 2),
            bit!("CC3IF", 3),
            res!(4, 2),
            bit!("TIF", 6),
            res!(7, 1),
        ]
    ),
    reg!(
        "SR2",
        0x05,
        ReadWrite,
        0x00,
        "TIM5 status register 2",
        &[
            res!(0, 1),
            bit!("CC1OF", 1),
            bit!("CC2OF", 2),
            bit!("CC3OF", 3),
            res!(4, 4),
        ]
    ),
    reg!(
        "EGR",
        0x06,
        WriteOnly,
        0x00,
        "TIM5 event generation register",
        &[
            bit!("UG", 0),
            bit!("CC1G", 1),
            bit!("CC2G", 2),
            bit!("CC3G", 3),
            res!(4, 2),
            bit!("TG", 6),
            res!(7, 1),
        ]
    ),
    ccmr!(
        "CCMR1",
        0x07,
        "TIM5 capture/compare mode register 1",
        "CC1S",
        oc_view!(no_fe, "OC1PE", "OC1M", no_ce),
        ic_view!("IC1PSC", "IC1F")
    ),
    ccmr!(
        "CCMR2",
        0x08,
        "TIM5 capture/compare mode register 2",
        "CC2S",
        oc_view!(no_fe, "OC2PE", "OC2M", no_ce),
        ic_view!("IC2PSC", "IC2F")
    ),
    ccmr!(
        "CCMR3",
        0x09,
        "TIM5 capture/compare mode register 3",
        "CC3S",
        oc_view!(no_fe, "OC3PE", "OC3M", no_ce),
        ic_view!("IC3PSC", "IC3F")
    ),
    reg!(
        "CCER1",
        0x0A,
        ReadWrite,
        0x00,
        "TIM5 capture/compare enable register 1",
        &[
            bit!("CC1E", 0),
            bit!("CC1P", 1),
            res!(2, 2),
            bit!("CC2E", 4),
            bit!("CC2P", 5),
            res!(6, 2),
        ]
    ),
    reg!(
        "CCER2",
        0x0B,
        ReadWrite,
        0x00,
        "TIM5 capture/compare enable register 2",
        &[bit!("CC3E", 0), bit!("CC3P", 1), res!(2, 6)]
    ),
    reg!("CNTRH", 0x0C, NoBitAccess, 0x00, "TIM5 counter high"),
    reg!("CNTRL", 0x0D, NoBitAccess, 0x00, "TIM5 counter low"),
    reg!(
        "PSCR",
        0x0E,
        ReadWrite,
        0x00,
        "TIM5 prescaler register",
        &[bits!("PSC", 0, 4), res!(4, 4)]
    ),
    reg!("ARRH", 0x0F, NoBitAccess, 0xFF, "TIM5 auto-reload register high"),
    reg!("ARRL", 0x10, NoBitAccess, 0xFF, "TIM5 auto-reload register low"),
    reg!("CCR1H", 0x11, NoBitAccess, 0x00, "TIM5 capture/compare register 1 high"),
    reg!("CCR1L", 0x12, NoBitAccess, 0x00, "TIM5 capture/compare register 1 low"),
    reg!("CCR2H", 0x13, NoBitAccess, 0x00, "TIM5 capture/compare register 2 high"),
    reg!("CCR2L", 0x14, NoBitAccess, 0x00, "TIM5 capture/compare register 2 low"),
    reg!("CCR3H", 0x15, NoBitAccess, 0x00, "TIM5 capture/compare register 3 high"),
    reg!("CCR3L", 0x16, NoBitAccess, 0x00, "TIM5 capture/compare register 3 low"),
];

static TIM6: &[RegisterField] = &[
    TIMX_CR1,
    reg!(
        "CR2",
        0x01,
        ReadWrite,
        0x00,
        "TIM6 control register 2",
        &[res!(0, 4), bits!("MMS", 4, 3), res!(7, 1)]
    ),
    reg!(
        "SMCR",
        0x02,
        ReadWrite,
        0x00,
        "TIM6 slave mode control register",
        &[bits!("SMS", 0, 3), res!(3, 1), bits!("TS", 4, 3), bit!("MSM", 7)]
    ),
    reg!(
        "IER",
        0x03,
        ReadWrite,
        0x00,
        "TIM6 interrupt enable register",
        &[bit!("UIE", 0), res!(1, 5), bit!("TIE", 6), res!(7, 1)]
    ),
    reg!(
        "SR",
        0x04,
        ReadWrite,
        0x00,
        "TIM6 status register",
        &[bit!("UIF", 0), res!(1, 5), bit!("TIF", 6), res!(7, 1)]
    ),
    reg!(
        "EGR",
        0x05,
        WriteOnly,
        0x00,
        "TIM6 event generation register",
        &[bit!("UG", 0), res!(1, 5), bit!("TG", 6), res!(7, 1)]
    ),
    reg!("CNTR", 0x06, NoBitAccess, 0x00, "TIM6 counter"),
    reg!(
        "PSCR",
        0x07,
        ReadWrite,
        0x00,
        "TIM6 prescaler register",
        &[bits!("PSC", 0, 3), res!(3, 5)]
    ),
    reg!("ARR", 0x08, NoBitAccess, 0xFF, "TIM6 auto-reload register"),
];

static ADC1: &[RegisterField] = &[
    reg!("DB0RH", 0x00, ReadOnly, 0x00, "ADC data buffer register 0 high"),
    reg!("DB0RL", 0x01, ReadOnly, 0x00, "ADC data buffer register 0 low"),
    reg!("DB1RH", 0x02, ReadOnly, 0x00, "ADC data buffer register 1 high"),
    reg!("DB1RL", 0x03, ReadOnly, 0x00, "ADC data buffer register 1 low"),
    reg!("DB2RH", 0x04, ReadOnly, 0x00, "ADC data buffer register 2 high"),
    reg!("DB2RL", 0x05, ReadOnly, 0x00, "ADC data buffer register 2 low"),
    reg!("DB3RH", 0x06, ReadOnly, 0x00, "ADC data buffer register 3 high"),
    reg!("DB3RL", 0x07, ReadOnly, 0x00, "ADC data buffer register 3 low"),
    reg!("DB4RH", 0x08, ReadOnly, 0x00, "ADC data buffer register 4 high"),
    reg!("DB4RL", 0x09, ReadOnly, 0x00, "ADC data buffer register 4 low"),
    reg!("DB5RH", 0x0A, ReadOnly, 0x00, "ADC data buffer register 5 high"),
    reg!("DB5RL", 0x0B, ReadOnly, 0x00, "ADC data buffer register 5 low"),
    reg!("DB6RH", 0x0C, ReadOnly, 0x00, "ADC data buffer register 6 high"),
    reg!("DB6RL", 0x0D, ReadOnly, 0x00, "ADC data buffer register 6 low"),
    reg!("DB7RH", 0x0E, ReadOnly, 0x00, "ADC data buffer register 7 high"),
    reg!("DB7RL", 0x0F, ReadOnly, 0x00, "ADC data buffer register 7 low"),
    reg!("DB8RH", 0x10, ReadOnly, 0x00, "ADC data buffer register 8 high"),
    reg!("DB8RL", 0x11, ReadOnly, 0x00, "ADC data buffer register 8 low"),
    reg!("DB9RH", 0x12, ReadOnly, 0x00, "ADC data buffer register 9 high"),
    reg!("DB9RL", 0x13, ReadOnly, 0x00, "ADC data buffer register 9 low"),
    reg!(
        "CSR",
        0x20,
        ReadWrite,
        0x00,
        "ADC control/status register",
        &[
            bits!("CH", 0, 4),
            bit!("AWDIE", 4),
            bit!("EOCIE", 5),
            bit!("AWD", 6),
            bit!("EOC", 7),
        ]
    ),
    reg!(
        "CR1",
        0x21,
        ReadWrite,
        0x00,
        "ADC configuration register 1",
        &[
            bit!("ADON", 0),
            bit!("CONT", 1),
            res!(2, 2),
            bits!("SPSEL", 4, 3),
            res!(7, 1),
        ]
    ),
    reg!(
        "CR2",
        0x22,
        ReadWrite,
        0x00,
        "ADC configuration register 2",
        &[
            res!(0, 1),
            bit!("SCAN", 1),
            res!(2, 1),
            bit!("ALIGN", 3),
            bits!("EXTSEL", 4, 2),
            bit!("EXTTRIG", 6),
            res!(7, 1),
        ]
    ),
    reg!(
        "CR3",
        0x23,
        ReadWrite,
        0x00,
        "ADC configuration register 3",
        &[res!(0, 6), bit!("OVR", 6), bit!("DBUF", 7)]
    ),
    reg!("DRH", 0x24, ReadOnly, 0x00, "ADC data register high"),
    reg!("DRL", 0x25, ReadOnly, 0x00, "ADC data register low"),
    reg!("TDRH", 0x26, NoBitAccess, 0x00, "ADC Schmitt trigger disable register high"),
    reg!("TDRL", 0x27, NoBitAccess, 0x00, "ADC Schmitt trigger disable register low"),
    reg!("HTRH", 0x28, NoBitAccess, 0xFF, "ADC high threshold register high"),
    reg!("HTRL", 0x29, NoBitAccess, 0x03, "ADC high threshold register low"),
    reg!("LTRH", 0x2A, NoBitAccess, 0x00, "ADC low threshold register high"),
    reg!("LTRL", 0x2B, NoBitAccess, 0x00, "ADC low threshold register low"),
    reg!("AWSRH", 0x2C, NoBitAccess, 0x00, "ADC analog watchdog status register high"),
    reg!("AWSRL", 0x2D, NoBitAccess, 0x00, "ADC analog watchdog status register low"),
    reg!("AWCRH", 0x2E, NoBitAccess, 0x00, "ADC analog watchdog control register high"),
    reg!("AWCRL", 0x2F, NoBitAccess, 0x00, "ADC analog watchdog control register low"),
];

static ADC1_PAIRS: &[WordPair] = &[
    pair!("DB0R", "DB0RH", "DB0RL"),
    pair!("DB1R", "DB1RH", "DB1RL"),
    pair!("DB2R", "DB2RH", "DB2RL"),
    pair!("DB3R", "DB3RH", "DB3RL"),
    pair!("DB4R", "DB4RH", "DB4RL"),
    pair!("DB5R", "DB5RH", "DB5RL"),
    pair!("DB6R", "DB6RH", "DB6RL"),
    pair!("DB7R", "DB7RH", "DB7RL"),
    pair!("DB8R", "DB8RH", "DB8RL"),
    pair!("DB9R", "DB9RH", "DB9RL"),
    pair!("DR", "DRH", "DRL"),
    pair!("TDR", "TDRH", "TDRL"),
    pair!("HTR", "HTRH", "HTRL"),
    pair!("LTR", "LTRH", "LTRL"),
    pair!("AWSR", "AWSRH", "AWSRL"),
    pair!("AWCR", "AWCRH", "AWCRL"),
];

static ADC2: &[RegisterField] = &[
    reg!(
        "CSR",
        0x00,
        ReadWrite,
        0x00,
        "ADC control/status register",
        &[
            bits!("CH", 0, 4),
            res!(4, 1),
            bit!("EOCIE", 5),
            res!(6, 1),
            bit!("EOC", 7),
        ]
    ),
    reg!(
        "CR1",
        0x01,
        ReadWrite,
        0x00,
        "ADC configuration register 1",
        &[
            bit!("ADON", 0),
            bit!("CONT", 1),
            res!(2, 2),
            bits!("SPSEL", 4, 3),
            res!(7, 1),
        ]
    ),
    reg!(
        "CR2",
        0x02,
        ReadWrite,
        0x00,
        "ADC configuration register 2",
        &[
            res!(0, 3),
            bit!("ALIGN", 3),
            bits!("EXTSEL", 4, 2),
            bit!("EXTTRIG", 6),
            res!(7, 1),
        ]
    ),
    reg!("DRH", 0x04, ReadOnly, 0x00, "ADC data register high"),
    reg!("DRL", 0x05, ReadOnly, 0x00, "ADC data register low"),
    reg!("TDRH", 0x06, NoBitAccess, 0x00, "ADC Schmitt trigger disable register high"),
    reg!("TDRL", 0x07, NoBitAccess, 0x00, "ADC Schmitt trigger disable register low"),
];

static ADC2_PAIRS: &[WordPair] = &[pair!("DR", "DRH", "DRL"), pair!("TDR", "TDRH", "TDRL")];

static ITC: &[RegisterField] = &[
    reg!(
        "SPR1",
        0x00,
        ReadWrite,
        0xFF,
        "Software priority register 1",
        &[
            res!(0, 2),
            bits!("VECT1SPR", 2, 2),
            bits!("VECT2SPR", 4, 2),
            bits!("VECT3SPR", 6, 2),
        ]
    ),
    reg!(
        "SPR2",
        0x01,
        ReadWrite,
        0xFF,
        "Software priority register 2",
        &[
            bits!("VECT4SPR", 0, 2),
            bits!("VECT5SPR", 2, 2),
            bits!("VECT6SPR", 4, 2),
            bits!("VECT7SPR", 6, 2),
        ]
    ),
    reg!(
        "SPR3",
        0x02,
        ReadWrite,
        0xFF,
        "Software priority register 3",
        &[
            bits!("VECT8SPR", 0, 2),
            bits!("VECT9SPR", 2, 2),
            bits!("VECT10SPR", 4, 2),
            bits!("VECT11SPR", 6, 2),
        ]
    ),
    reg!(
        "SPR4",
        0x03,
        ReadWrite,
        0xFF,
        "Software priority register 4",
        &[
            bits!("VECT12SPR", 0, 2),
            bits!("VECT13SPR", 2, 2),
            bits!("VECT14SPR", 4, 2),
            bits!("VECT15SPR", 6, 2),
        ]
    ),
    reg!(
        "SPR5",
        0x04,
        ReadWrite,
        0xFF,
        "Software priority register 5",
        &[
            bits!("VECT16SPR", 0, 2),
            bits!("VECT17SPR", 2, 2),
            bits!("VECT18SPR", 4, 2),
            bits!("VECT19SPR", 6, 2),
        ]
    ),
    reg!(
        "SPR6",
        0x05,
        ReadWrite,
        0xFF,
        "Software priority register 6",
        &[
            bits!("VECT20SPR", 0, 2),
            bits!("VECT21SPR", 2, 2),
            bits!("VECT22SPR", 4, 2),
            bits!("VECT23SPR", 6, 2),
        ]
    ),
    reg!(
        "SPR7",
        0x06,
        ReadWrite,
        0xFF,
        "Software priority register 7",
        &[
            bits!("VECT24SPR", 0, 2),
            bits!("VECT25SPR", 2, 2),
            bits!("VECT26SPR", 4, 2),
            bits!("VECT27SPR", 6, 2),
        ]
    ),
    reg!(
        "SPR8",
        0x07,
        ReadWrite,
        0x0F,
        "Software priority register 8",
        &[bits!("VECT28SPR", 0, 2), bits!("VECT29SPR", 2, 2), res!(4, 4)]
    ),
];

pub(crate) fn layout(kind: AfsKind, line: AfsLine) -> RegisterLayout {
    use AfsKind::*;
    match kind {
        PortA | PortB | PortC | PortD | PortE | PortF | PortG | PortH | PortI => common::gpio(),
        Flash => RegisterLayout::new("FLASH", FLASH, &[], FLASH_KEYS),
        Exti => RegisterLayout::new("EXTI", EXTI, &[], &[]),
        Rst => RegisterLayout::new("RST", RST, &[], &[]),
        Clk => RegisterLayout::new("CLK", CLK, &[], CLK_SOURCES),
        Wwdg => common::wwdg(),
        Iwdg => common::iwdg(),
        Awu => common::awu(),
        Beep => common::beep(),
        Spi => RegisterLayout::new("SPI", SPI, &[], &[]),
        I2c => common::i2c_stm8s(),
        Uart1 => RegisterLayout::new("UART1", UART1, &[], &[]),
        Uart2 => RegisterLayout::new("UART2", UART2, &[], &[]),
        Uart3 => RegisterLayout::new("UART3", UART3, &[], &[]),
        Uart4 => RegisterLayout::new("UART4", UART4, &[], &[]),
        Tim1 => RegisterLayout::new("TIM1", TIM1, TIM1_PAIRS, &[]),
        Tim2 => low_density_gap(RegisterLayout::new("TIM2", TIM2, TIM2_PAIRS, &[]), line),
        Tim3 => RegisterLayout::new("TIM3", TIM3, TIM3_PAIRS, &[]),
        Tim4 => low_density_gap(RegisterLayout::new("TIM4", TIM4, &[], &[]), line),
        Tim5 => RegisterLayout::new("TIM5", TIM5, TIM2_PAIRS, &[]),
        Tim6 => RegisterLayout::new("TIM6", TIM6, &[], &[]),
        Adc1 => RegisterLayout::new("ADC1", ADC1, ADC1_PAIRS, &[]),
        Adc2 => RegisterLayout::new("ADC2", ADC2, ADC2_PAIRS, &[]),
        Cfg => common::cfg(),
        Itc => RegisterLayout::new("ITC", ITC, &[], &[]),
        Opt | Can | Dm | Uid => RegisterLayout::address_only(kind.name()),
    }
}

fn low_density_gap(layout: RegisterLayout, line: AfsLine) -> RegisterLayout {
    if line.has_low_density_timers() {
        layout.with_gap_after("CR1", 2)
    } else {
        layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tim4_low_density_shift() {
        let generic = layout(AfsKind::Tim4, AfsLine::S105);
        let shifted = layout(AfsKind::Tim4, AfsLine::S103);
        let ier = |l: &RegisterLayout| l.register("IER").map(|r| r.offset);
        assert_eq!(ier(&generic), Some(0x01));
        assert_eq!(ier(&shifted), Some(0x03));
        assert_eq!(shifted.register("ARR").map(|r| r.offset), Some(0x08));
        assert_eq!(shifted.register("CR1").map(|r| r.offset), Some(0x00));
    }

    #[test]
    fn test_clk_ckdivr() {
        let clk = layout(AfsKind::Clk, AfsLine::S105);
        let ckdivr = clk.register("CKDIVR").unwrap();
        assert_eq!(ckdivr.offset, 0x06);
        assert_eq!(ckdivr.reset_value, 0x18);
        let (_, cpudiv) = ckdivr.field("CPUDIV").unwrap();
        assert_eq!((cpudiv.offset, cpudiv.width), (0, 3));
    }

    #[test]
    fn test_address_only_blocks() {
        assert!(layout(AfsKind::Can, AfsLine::S208).is_address_only());
        assert!(layout(AfsKind::Opt, AfsLine::S103).is_address_only());
        assert_eq!(layout(AfsKind::PortD, AfsLine::S103).peripheral, "GPIO");
    }
}
