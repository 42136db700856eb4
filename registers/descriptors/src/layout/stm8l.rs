// Licensed under the Apache-2.0 license

//! Register layouts of the STM8L10x line.

use super::{common, NamedValue, RegisterField, RegisterLayout, WordPair};
use crate::family::{L10xKind, PeripheralKind};

static FLASH: &[RegisterField] = &[
    reg!(
        "CR1",
        0x00,
        ReadWrite,
        0x00,
        "Flash control register 1",
        &[bit!("FIX", 0), bit!("IE", 1), res!(2, 6)]
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
    reg!("PUKR", 0x02, WriteOnly, 0x00, "Flash program memory unprotection register"),
    reg!("DUKR", 0x03, WriteOnly, 0x00, "Data EEPROM unprotection register"),
    reg!(
        "IAPSR",
        0x04,
        ReadWrite,
        0x40,
        "Flash in-application programming status register",
        &[
            bit!("WR_PG_DIS", 0),
            bit!("PUL", 1),
            bit!("EOP", 2),
            bit!("DUL", 3),
            res!(4, 4),
        ]
    ),
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
            bits!("P0IS", 0, 2),
            bits!("P1IS", 2, 2),
            bits!("P2IS", 4, 2),
            bits!("P3IS", 6, 2),
        ]
    ),
    reg!(
        "CR2",
        0x01,
        ReadWrite,
        0x00,
        "External interrupt control register 2",
        &[
            bits!("P4IS", 0, 2),
            bits!("P5IS", 2, 2),
            bits!("P6IS", 4, 2),
            bits!("P7IS", 6, 2),
        ]
    ),
    reg!(
        "CR3",
        0x02,
        ReadWrite,
        0x00,
        "External interrupt control register 3",
        &[bits!("PBIS", 0, 2), bits!("PDIS", 2, 2), res!(4, 4)]
    ),
    reg!(
        "SR1",
        0x03,
        ReadWrite,
        0x00,
        "External interrupt status register 1",
        &[
            bit!("P0F", 0),
            bit!("P1F", 1),
            bit!("P2F", 2),
            bit!("P3F", 3),
            bit!("P4F", 4),
            bit!("P5F", 5),
            bit!("P6F", 6),
            bit!("P7F", 7),
        ]
    ),
    reg!(
        "SR2",
        0x04,
        ReadWrite,
        0x00,
        "External interrupt status register 2",
        &[bit!("PBF", 0), bit!("PDF", 1), res!(2, 6)]
    ),
    reg!(
        "CONF",
        0x05,
        ReadWrite,
        0x00,
        "External interrupt port select register",
        &[
            bit!("PBLIS", 0),
            bit!("PBHIS", 1),
            bit!("PDLIS", 2),
            bit!("PDHIS", 3),
            res!(4, 4),
        ]
    ),
];

static WFE: &[RegisterField] = &[
    reg!(
        "CR1",
        0x00,
        ReadWrite,
        0x03,
        "WFE control register 1",
        &[
            bit!("TIM2_EV0", 0),
            bit!("TIM2_EV1", 1),
            res!(2, 2),
            bit!("EXTI_EV0", 4),
            bit!("EXTI_EV1", 5),
            bit!("EXTI_EV2", 6),
            bit!("EXTI_EV3", 7),
        ]
    ),
    reg!(
        "CR2",
        0x01,
        ReadWrite,
        0x00,
        "WFE control register 2",
        &[
            bit!("EXTI_EV4", 0),
            bit!("EXTI_EV5", 1),
            bit!("EXTI_EV6", 2),
            bit!("EXTI_EV7", 3),
            bit!("EXTI_EVB", 4),
            bit!("EXTI_EVD", 5),
            res!(6, 2),
        ]
    ),
];

static RST: &[RegisterField] = &[
    reg!("CR", 0x00, NoBitAccess, 0x00, "Reset pin configuration register"),
    reg!(
        "SR",
        0x01,
        ReadWrite,
        0x00,
        "Reset status register",
        &[
            bit!("PORF", 0),
            bit!("IWDGF", 1),
            bit!("ILLOPF", 2),
            bit!("SWIMF", 3),
            res!(4, 4),
        ]
    ),
];

static CLK: &[RegisterField] = &[
    reg!(
        "CKDIVR",
        0x00,
        ReadWrite,
        0x03,
        "Clock divider register",
        &[bits!("HSIDIV", 0, 2), res!(2, 6)]
    ),
    reg!(
        "PCKENR",
        0x03,
        ReadWrite,
        0x00,
        "Peripheral clock gating register",
        &[
            bit!("PCKEN_TIM2", 0),
            bit!("PCKEN_TIM3", 1),
            bit!("PCKEN_TIM4", 2),
            bit!("PCKEN_I2C", 3),
            bit!("PCKEN_SPI", 4),
            bit!("PCKEN_USART", 5),
            bit!("PCKEN_AWU_BEEP", 6),
            res!(7, 1),
        ]
    ),
    reg!(
        "CCOR",
        0x05,
        ReadWrite,
        0x00,
        "Configurable clock output register",
        &[bit!("CCOEN", 0), bits!("CCOSEL", 1, 2), res!(3, 5)]
    ),
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
            res!(3, 3),
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
            res!(4, 1),
            bit!("MODF", 5),
            bit!("OVR", 6),
            bit!("BSY", 7),
        ]
    ),
    reg!("DR", 0x04, NoBitAccess, 0x00, "SPI data register"),
];

static USART: &[RegisterField] = &[
    reg!(
        "SR",
        0x00,
        ReadWrite,
        0xC0,
        "USART status register",
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
    ),
    reg!("DR", 0x01, NoBitAccess, 0x00, "USART data register"),
    reg!("BRR1", 0x02, NoBitAccess, 0x00, "USART baud rate register 1, divider bits [11:4]"),
    reg!(
        "BRR2",
        0x03,
        ReadWrite,
        0x00,
        "USART baud rate register 2",
        &[bits!("DIV_0_3", 0, 4), bits!("DIV_12_15", 4, 4)]
    ),
    reg!(
        "CR1",
        0x04,
        ReadWrite,
        0x00,
        "USART control register 1",
        &[
            bit!("PIEN", 0),
            bit!("PS", 1),
            bit!("PCEN", 2),
            bit!("WAKE", 3),
            bit!("M", 4),
            bit!("USARTD", 5),
            bit!("T8", 6),
            bit!("R8", 7),
        ]
    ),
    reg!(
        "CR2",
        0x05,
        ReadWrite,
        0x00,
        "USART control register 2",
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
    ),
    reg!(
        "CR3",
        0x06,
        ReadWrite,
        0x00,
        "USART control register 3",
        &[
            bit!("LBCL", 0),
            bit!("CPHA", 1),
            bit!("CPOL", 2),
            bit!("CKEN", 3),
            bits!("STOP", 4, 2),
            res!(6, 2),
        ]
    ),
    reg!(
        "CR4",
        0x07,
        ReadWrite,
        0x00,
        "USART control register 4",
        &[bits!("ADD", 0, 4), res!(4, 4)]
    ),
];

/// TIM2 and TIM3 share one layout on this line.
macro_rules! general_timer {
    ($name:ident, $tim:literal) => {
        static $name: &[RegisterField] = &[
            reg!(
                "CR1",
                0x00,
                ReadWrite,
                0x00,
                concat!($tim, " control register 1"),
                &[
                    bit!("CEN", 0),
                    bit!("UDIS", 1),
                    bit!("URS", 2),
                    bit!("OPM", 3),
                    bit!("DIR", 4),
                    res!(5, 2),
                    bit!("ARPE", 7),
                ]
            ),
            reg!(
                "CR2",
                0x01,
                ReadWrite,
                0x00,
                concat!($tim, " control register 2"),
                &[res!(0, 4), bits!("MMS", 4, 3), res!(7, 1)]
            ),
            reg!(
                "SMCR",
                0x02,
                ReadWrite,
                0x00,
                concat!($tim, " slave mode control register"),
                &[bits!("SMS", 0, 3), res!(3, 1), bits!("TS", 4, 3), bit!("MSM", 7)]
            ),
            reg!(
                "ETR",
                0x03,
                ReadWrite,
                0x00,
                concat!($tim, " external trigger register"),
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
                concat!($tim, " interrupt enable register"),
                &[
                    bit!("UIE", 0),
                    bit!("CC1IE", 1),
                    bit!("CC2IE", 2),
                    res!(3, 3),
                    bit!("TIE", 6),
                    bit!("BIE", 7),
                ]
            ),
            reg!(
                "SR1",
                0x05,
                ReadWrite,
                0x00,
                concat!($tim, " status register 1"),
                &[
                    bit!("UIF", 0),
                    bit!("CC1IF", 1),
                    bit!("CC2IF", 2),
                    res!(3, 3),
                    bit!("TIF", 6),
                    bit!("BIF", 7),
                ]
            ),
            reg!(
                "SR2",
                0x06,
                ReadWrite,
                0x00,
                concat!($tim, " status register 2"),
                &[res!(0, 1), bit!("CC1OF", 1), bit!("CC2OF", 2), res!(3, 5)]
            ),
            reg!(
                "EGR",
                0x07,
                WriteOnly,
                0x00,
                concat!($tim, " event generation register"),
                &[
                    bit!("UG", 0),
                    bit!("CC1G", 1),
                    bit!("CC2G", 2),
                    res!(3, 3),
                    bit!("TG", 6),
                    bit!("BG", 7),
                ]
            ),
            ccmr!(
                "CCMR1",
                0x08,
                concat!($tim, " capture/compare mode register 1"),
                "CC1S",
                oc_view!("OC1FE", "OC1PE", "OC1M", no_ce),
                ic_view!("IC1PSC", "IC1F")
            ),
            ccmr!(
                "CCMR2",
                0x09,
                concat!($tim, " capture/compare mode register 2"),
                "CC2S",
                oc_view!("OC2FE", "OC2PE", "OC2M", no_ce),
                ic_view!("IC2PSC", "IC2F")
            ),
            reg!(
                "CCER1",
                0x0A,
                ReadWrite,
                0x00,
                concat!($tim, " capture/compare enable register 1"),
                &[
                    bit!("CC1E", 0),
                    bit!("CC1P", 1),
                    res!(2, 2),
                    bit!("CC2E", 4),
                    bit!("CC2P", 5),
                    res!(6, 2),
                ]
            ),
            reg!("CNTRH", 0x0B, NoBitAccess, 0x00, concat!($tim, " counter high")),
            reg!("CNTRL", 0x0C, NoBitAccess, 0x00, concat!($tim, " counter low")),
            reg!(
                "PSCR",
                0x0D,
                ReadWrite,
                0x00,
                concat!($tim, " prescaler register"),
                &[bits!("PSC", 0, 3), res!(3, 5)]
            ),
            reg!("ARRH", 0x0E, NoBitAccess, 0xFF, concat!($tim, " auto-reload register high")),
            reg!("ARRL", 0x0F, NoBitAccess, 0xFF, concat!($tim, " auto-reload register low")),
            reg!("CCR1H", 0x10, NoBitAccess, 0x00, concat!($tim, " capture/compare register 1 high")),
            reg!("CCR1L", 0x11, NoBitAccess, 0x00, concat!($tim, " capture/compare register 1 low")),
            reg!("CCR2H", 0x12, NoBitAccess, 0x00, concat!($tim, " capture/compare register 2 high")),
            reg!("CCR2L", 0x13, NoBitAccess, 0x00, concat!($tim, " capture/compare register 2 low")),
            reg!(
                "BKR",
                0x14,
                ReadWrite,
                0x00,
                concat!($tim, " break register"),
                &[
                    bits!("LOCK", 0, 2),
                    bit!("OSSI", 2),
                    res!(3, 1),
                    bit!("BKE", 4),
                    bit!("BKP", 5),
                    bit!("AOE", 6),
                    bit!("MOE", 7),
                ]
            ),
            reg!(
                "OISR",
                0x15,
                ReadWrite,
                0x00,
                concat!($tim, " output idle state register"),
                &[bit!("OIS1", 0), res!(1, 1), bit!("OIS2", 2), res!(3, 5)]
            ),
        ];
    };
}

general_timer!(TIM2, "TIM2");
general_timer!(TIM3, "TIM3");

static TIMX_PAIRS: &[WordPair] = &[
    pair!("CNTR", "CNTRH", "CNTRL"),
    pair!("ARR", "ARRH", "ARRL"),
    pair!("CCR1", "CCR1H", "CCR1L"),
    pair!("CCR2", "CCR2H", "CCR2L"),
];

static TIM4: &[RegisterField] = &[
    reg!(
        "CR1",
        0x00,
        ReadWrite,
        0x00,
        "TIM4 control register 1",
        &[
            bit!("CEN", 0),
            bit!("UDIS", 1),
            bit!("URS", 2),
            bit!("OPM", 3),
            res!(4, 3),
            bit!("ARPE", 7),
        ]
    ),
    reg!(
        "CR2",
        0x01,
        ReadWrite,
        0x00,
        "TIM4 control register 2",
        &[res!(0, 4), bits!("MMS", 4, 3), res!(7, 1)]
    ),
    reg!(
        "SMCR",
        0x02,
        ReadWrite,
        0x00,
        "TIM4 slave mode control register",
        &[bits!("SMS", 0, 3), res!(3, 1), bits!("TS", 4, 3), bit!("MSM", 7)]
    ),
    reg!(
        "IER",
        0x03,
        ReadWrite,
        0x00,
        "TIM4 interrupt enable register",
        &[bit!("UIE", 0), res!(1, 5), bit!("TIE", 6), res!(7, 1)]
    ),
    reg!(
        "SR1",
        0x04,
        ReadWrite,
        0x00,
        "TIM4 status register 1",
        &[bit!("UIF", 0), res!(1, 5), bit!("TIF", 6), res!(7, 1)]
    ),
    reg!(
        "EGR",
        0x05,
        WriteOnly,
        0x00,
        "TIM4 event generation register",
        &[bit!("UG", 0), res!(1, 5), bit!("TG", 6), res!(7, 1)]
    ),
    reg!("CNTR", 0x06, NoBitAccess, 0x00, "TIM4 counter"),
    reg!(
        "PSCR",
        0x07,
        ReadWrite,
        0x00,
        "TIM4 prescaler register",
        &[bits!("PSC", 0, 4), res!(4, 4)]
    ),
    reg!("ARR", 0x08, NoBitAccess, 0xFF, "TIM4 auto-reload register"),
];

static IRTIM: &[RegisterField] = &[reg!(
    "CR",
    0x00,
    ReadWrite,
    0x00,
    "Infrared control register",
    &[bit!("IR_EN", 0), bit!("HS_EN", 1), res!(2, 6)]
)];

static COMP: &[RegisterField] = &[
    reg!(
        "CR",
        0x00,
        ReadWrite,
        0x00,
        "Comparator control register",
        &[
            bit!("BIAS_EN", 0),
            bit!("COMP1_EN", 1),
            bit!("COMP2_EN", 2),
            bit!("COMPREF", 3),
            bit!("POL", 4),
            bits!("CNF_TIM", 5, 2),
            bit!("IC1_BK", 7),
        ]
    ),
    reg!(
        "CSR",
        0x01,
        ReadWrite,
        0x00,
        "Comparator status register",
        &[
            bit!("COMP1_OUT", 0),
            bit!("COMP2_OUT", 1),
            res!(2, 2),
            bit!("CEF1", 4),
            bit!("ITEN1", 5),
            bit!("CEF2", 6),
            bit!("ITEN2", 7),
        ]
    ),
    reg!(
        "CCS",
        0x02,
        ReadWrite,
        0x00,
        "Comparator channel selection register",
        &[
            bit!("COMP1_CH1", 0),
            bit!("COMP1_CH2", 1),
            bit!("COMP1_CH3", 2),
            bit!("COMP1_CH4", 3),
            bit!("COMP2_CH1", 4),
            bit!("COMP2_CH2", 5),
            bit!("COMP2_CH3", 6),
            bit!("COMP2_CH4", 7),
        ]
    ),
];

static ITC: &[RegisterField] = &[
    reg!(
        "SPR1",
        0x00,
        ReadWrite,
        0xFF,
        "Software priority register 1",
        &[res!(0, 2), bits!("VECT1SPR", 2, 2), res!(4, 4)]
    ),
    reg!(
        "SPR2",
        0x01,
        ReadWrite,
        0xFF,
        "Software priority register 2",
        &[
            bits!("VECT4SPR", 0, 2),
            res!(2, 2),
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
        &[res!(0, 6), bits!("VECT19SPR", 6, 2)]
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
            res!(6, 2),
        ]
    ),
    reg!(
        "SPR7",
        0x06,
        ReadWrite,
        0xFF,
        "Software priority register 7",
        &[
            res!(0, 2),
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

pub(crate) fn layout(kind: L10xKind) -> RegisterLayout {
    use L10xKind::*;
    match kind {
        PortA | PortB | PortC | PortD => common::gpio(),
        Flash => RegisterLayout::new("FLASH", FLASH, &[], FLASH_KEYS),
        Exti => RegisterLayout::new("EXTI", EXTI, &[], &[]),
        Wfe => RegisterLayout::new("WFE", WFE, &[], &[]),
        Rst => RegisterLayout::new("RST", RST, &[], &[]),
        Clk => RegisterLayout::new("CLK", CLK, &[], &[]),
        Iwdg => common::iwdg(),
        Awu => common::awu(),
        Beep => common::beep(),
        Spi => RegisterLayout::new("SPI", SPI, &[], &[]),
        I2c => common::i2c_stm8l(),
        Usart => RegisterLayout::new("USART", USART, &[], &[]),
        Tim2 => RegisterLayout::new("TIM2", TIM2, TIMX_PAIRS, &[]),
        Tim3 => RegisterLayout::new("TIM3", TIM3, TIMX_PAIRS, &[]),
        Tim4 => RegisterLayout::new("TIM4", TIM4, &[], &[]),
        Irtim => RegisterLayout::new("IRTIM", IRTIM, &[], &[]),
        Comp => RegisterLayout::new("COMP", COMP, &[], &[]),
        Cfg => common::cfg(),
        Itc => RegisterLayout::new("ITC", ITC, &[], &[]),
        Opt | Dm | Uid => RegisterLayout::address_only(kind.name()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tim2_has_break_register() {
        let tim2 = layout(L10xKind::Tim2);
        assert_eq!(tim2.register("BKR").map(|r| r.offset), Some(0x14));
        assert_eq!(tim2.register("CCMR1").map(|r| r.offset), Some(0x08));
        assert_eq!(tim2.pairs.len(), 4);
    }

    #[test]
    fn test_clk_differs_from_stm8s() {
        let clk = layout(L10xKind::Clk);
        assert!(clk.register("ICKR").is_none());
        assert_eq!(clk.register("CKDIVR").map(|r| r.reset_value), Some(0x03));
        assert_eq!(clk.register("PCKENR").map(|r| r.offset), Some(0x03));
    }
}
