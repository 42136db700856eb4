// Licensed under the Apache-2.0 license

//! STM8TL5x layouts.
//!
//! The touch-sensing line shares its flash, EXTI, SPI, USART and timer
//! blocks with STM8L10x. It differs in the clock, reset, wake-up and
//! interrupt priority registers, and adds SYSCFG, WWDG and the ProxSense
//! (PXS) controller.

use super::{common, stm8l, NamedValue, RegisterField, RegisterLayout, WordPair};
use crate::family::{L10xKind, PeripheralKind, Tl5xKind};

static SYSCFG: &[RegisterField] = &[reg!(
    "RMPCR",
    0x00,
    ReadWrite,
    0x1F,
    "Remap control register",
    &[
        res!(0, 2),
        bit!("TIM3_CH1", 2),
        bit!("TIM3_CH2", 3),
        res!(4, 4),
    ]
)];

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
            bit!("WWDGF", 4),
            res!(5, 3),
        ]
    ),
];

/// Written to `RST_CR`, turns the reset pin into a GPIO.
static RST_KEYS: &[NamedValue] = &[value!("CR", "PIN_KEY", 0xD0)];

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
        "PCKENR1",
        0x03,
        ReadWrite,
        0x00,
        "Peripheral clock gating register 1",
        &[
            bit!("PCKEN_TIM2", 0),
            bit!("PCKEN_TIM3", 1),
            bit!("PCKEN_TIM4", 2),
            bit!("PCKEN_I2C", 3),
            bit!("PCKEN_SPI", 4),
            bit!("PCKEN_USART", 5),
            bit!("PCKEN_AWU", 6),
            bit!("PCKEN_PXS", 7),
        ]
    ),
    reg!(
        "PCKENR2",
        0x04,
        ReadWrite,
        0x01,
        "Peripheral clock gating register 2",
        &[bit!("PCKEN_WWDG", 0), res!(1, 7)]
    ),
    reg!(
        "CCOR",
        0x05,
        ReadWrite,
        0x10,
        "Configurable clock output register",
        &[
            bit!("CCOEN", 0),
            bits!("CCOSEL", 1, 3),
            bits!("CCOSLP", 4, 2),
            res!(6, 2),
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
            res!(2, 1),
            bit!("PXS_EV", 3),
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
            res!(6, 2),
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

static PXS: &[RegisterField] = &[
    reg!(
        "CR1",
        0x00,
        ReadWrite,
        0x00,
        "ProxSense control register 1",
        &[
            res!(0, 5),
            bit!("LOW_POWER", 5),
            bit!("START", 6),
            bit!("PXSEN", 7),
        ]
    ),
    reg!(
        "CR2",
        0x01,
        ReadWrite,
        0x00,
        "ProxSense control register 2",
        &[
            bit!("SYNCEDGE", 0),
            bit!("SYNCEN", 1),
            bit!("RXCOUPLING", 2),
            bit!("RXGROUP", 3),
            res!(4, 1),
            bit!("NOISEDETEN", 5),
            bit!("FCCITEN", 6),
            bit!("EOCITEN", 7),
        ]
    ),
    reg!(
        "CR3",
        0x02,
        ReadWrite,
        0x00,
        "ProxSense control register 3",
        &[bits!("VTHR", 0, 4), bits!("BIAS", 4, 2), bits!("STAB", 6, 2)]
    ),
    reg!(
        "ISR",
        0x04,
        ReadWrite,
        0x00,
        "ProxSense interrupt and status register",
        &[
            res!(0, 2),
            bit!("SYNC_OVRF", 2),
            bit!("SYNCPF", 3),
            bit!("CIPF", 4),
            bit!("NOISEDETF", 5),
            bit!("FCCF", 6),
            bit!("EOCF", 7),
        ]
    ),
    reg!(
        "CKCR1",
        0x06,
        ReadWrite,
        0x30,
        "ProxSense clock control register 1",
        &[
            bit!("INCPHASE", 0),
            bit!("ANADEAD", 1),
            res!(2, 2),
            bits!("PRESC", 4, 3),
            res!(7, 1),
        ]
    ),
    reg!(
        "CKCR2",
        0x07,
        ReadWrite,
        0x11,
        "ProxSense clock control register 2",
        &[
            bits!("PASSLEN", 0, 3),
            res!(3, 1),
            bits!("UPLEN", 4, 3),
            res!(7, 1),
        ]
    ),
    reg!(
        "RXENRH",
        0x08,
        ReadWrite,
        0x00,
        "ProxSense receiver enable register high",
        &[bit!("RXEN8", 0), bit!("RXEN9", 1), res!(2, 6)]
    ),
    reg!(
        "RXENRL",
        0x09,
        ReadWrite,
        0x00,
        "ProxSense receiver enable register low",
        &[
            bit!("RXEN0", 0),
            bit!("RXEN1", 1),
            bit!("RXEN2", 2),
            bit!("RXEN3", 3),
            bit!("RXEN4", 4),
            bit!("RXEN5", 5),
            bit!("RXEN6", 6),
            bit!("RXEN7", 7),
        ]
    ),
    reg!(
        "RXCR1H",
        0x0A,
        ReadWrite,
        0x00,
        "ProxSense receiver control register 1 high",
        &[bit!("RXCR1_8", 0), bit!("RXCR1_9", 1), res!(2, 6)]
    ),
    reg!(
        "RXCR1L",
        0x0B,
        ReadWrite,
        0x00,
        "ProxSense receiver control register 1 low",
        &[
            bit!("RXCR1_0", 0),
            bit!("RXCR1_1", 1),
            bit!("RXCR1_2", 2),
            bit!("RXCR1_3", 3),
            bit!("RXCR1_4", 4),
            bit!("RXCR1_5", 5),
            bit!("RXCR1_6", 6),
            bit!("RXCR1_7", 7),
        ]
    ),
    reg!(
        "RXCR2H",
        0x0C,
        ReadWrite,
        0x00,
        "ProxSense receiver control register 2 high",
        &[bit!("RXCR2_8", 0), bit!("RXCR2_9", 1), res!(2, 6)]
    ),
    reg!(
        "RXCR2L",
        0x0D,
        ReadWrite,
        0x00,
        "ProxSense receiver control register 2 low",
        &[
            bit!("RXCR2_0", 0),
            bit!("RXCR2_1", 1),
            bit!("RXCR2_2", 2),
            bit!("RXCR2_3", 3),
            bit!("RXCR2_4", 4),
            bit!("RXCR2_5", 5),
            bit!("RXCR2_6", 6),
            bit!("RXCR2_7", 7),
        ]
    ),
    reg!(
        "RXCR3H",
        0x0E,
        ReadWrite,
        0x00,
        "ProxSense receiver control register 3 high",
        &[bit!("RXCR3_8", 0), bit!("RXCR3_9", 1), res!(2, 6)]
    ),
    reg!(
        "RXCR3L",
        0x0F,
        ReadWrite,
        0x00,
        "ProxSense receiver control register 3 low",
        &[
            bit!("RXCR3_0", 0),
            bit!("RXCR3_1", 1),
            bit!("RXCR3_2", 2),
            bit!("RXCR3_3", 3),
            bit!("RXCR3_4", 4),
            bit!("RXCR3_5", 5),
            bit!("RXCR3_6", 6),
            bit!("RXCR3_7", 7),
        ]
    ),
    reg!(
        "RXINSRH",
        0x12,
        ReadWrite,
        0x00,
        "ProxSense receiver inactive state register high",
        &[bit!("RXINS8", 0), bit!("RXINS9", 1), res!(2, 6)]
    ),
    reg!(
        "RXINSRL",
        0x13,
        ReadWrite,
        0x00,
        "ProxSense receiver inactive state register low",
        &[
            bit!("RXINS0", 0),
            bit!("RXINS1", 1),
            bit!("RXINS2", 2),
            bit!("RXINS3", 3),
            bit!("RXINS4", 4),
            bit!("RXINS5", 5),
            bit!("RXINS6", 6),
            bit!("RXINS7", 7),
        ]
    ),
    reg!(
        "TXENRH",
        0x16,
        ReadWrite,
        0x00,
        "ProxSense transmit enable register high",
        &[
            bit!("TXEN8", 0),
            bit!("TXEN9", 1),
            bit!("TXEN10", 2),
            bit!("TXEN11", 3),
            bit!("TXEN12", 4),
            bit!("TXEN13", 5),
            bit!("TXEN14", 6),
            bit!("TXEN15", 7),
        ]
    ),
    reg!(
        "TXENRL",
        0x17,
        ReadWrite,
        0x00,
        "ProxSense transmit enable register low",
        &[
            bit!("TXEN0", 0),
            bit!("TXEN1", 1),
            bit!("TXEN2", 2),
            bit!("TXEN3", 3),
            bit!("TXEN4", 4),
            bit!("TXEN5", 5),
            bit!("TXEN6", 6),
            bit!("TXEN7", 7),
        ]
    ),
    reg!(
        "MAXRH",
        0x1A,
        NoBitAccess,
        0xFF,
        "ProxSense maximum counter value register high"
    ),
    reg!(
        "MAXRL",
        0x1B,
        NoBitAccess,
        0xFF,
        "ProxSense maximum counter value register low"
    ),
    reg!(
        "MAXENRH",
        0x1C,
        ReadWrite,
        0x00,
        "ProxSense maximum counter enable register high",
        &[bit!("MAXEN8", 0), bit!("MAXEN9", 1), res!(2, 6)]
    ),
    reg!(
        "MAXENRL",
        0x1D,
        ReadWrite,
        0x00,
        "ProxSense maximum counter enable register low",
        &[
            bit!("MAXEN0", 0),
            bit!("MAXEN1", 1),
            bit!("MAXEN2", 2),
            bit!("MAXEN3", 3),
            bit!("MAXEN4", 4),
            bit!("MAXEN5", 5),
            bit!("MAXEN6", 6),
            bit!("MAXEN7", 7),
        ]
    ),
    reg!(
        "RXSRH",
        0x1E,
        ReadOnly,
        0x00,
        "ProxSense receiver status register high",
        &[bit!("VALID8", 0), bit!("VALID9", 1), res!(2, 6)]
    ),
    reg!(
        "RXSRL",
        0x1F,
        ReadOnly,
        0x00,
        "ProxSense receiver status register low",
        &[
            bit!("VALID0", 0),
            bit!("VALID1", 1),
            bit!("VALID2", 2),
            bit!("VALID3", 3),
            bit!("VALID4", 4),
            bit!("VALID5", 5),
            bit!("VALID6", 6),
            bit!("VALID7", 7),
        ]
    ),
    reg!("RX0CNTRH", 0x20, ReadOnly, 0x00, "ProxSense channel 0 counter high"),
    reg!("RX0CNTRL", 0x21, ReadOnly, 0x00, "ProxSense channel 0 counter low"),
    reg!("RX1CNTRH", 0x22, ReadOnly, 0x00, "ProxSense channel 1 counter high"),
    reg!("RX1CNTRL", 0x23, ReadOnly, 0x00, "ProxSense channel 1 counter low"),
    reg!("RX2CNTRH", 0x24, ReadOnly, 0x00, "ProxSense channel 2 counter high"),
    reg!("RX2CNTRL", 0x25, ReadOnly, 0x00, "ProxSense channel 2 counter low"),
    reg!("RX3CNTRH", 0x26, ReadOnly, 0x00, "ProxSense channel 3 counter high"),
    reg!("RX3CNTRL", 0x27, ReadOnly, 0x00, "ProxSense channel 3 counter low"),
    reg!("RX4CNTRH", 0x28, ReadOnly, 0x00, "ProxSense channel 4 counter high"),
    reg!("RX4CNTRL", 0x29, ReadOnly, 0x00, "ProxSense channel 4 counter low"),
    reg!("RX5CNTRH", 0x2A, ReadOnly, 0x00, "ProxSense channel 5 counter high"),
    reg!("RX5CNTRL", 0x2B, ReadOnly, 0x00, "ProxSense channel 5 counter low"),
    reg!("RX6CNTRH", 0x2C, ReadOnly, 0x00, "ProxSense channel 6 counter high"),
    reg!("RX6CNTRL", 0x2D, ReadOnly, 0x00, "ProxSense channel 6 counter low"),
    reg!("RX7CNTRH", 0x2E, ReadOnly, 0x00, "ProxSense channel 7 counter high"),
    reg!("RX7CNTRL", 0x2F, ReadOnly, 0x00, "ProxSense channel 7 counter low"),
    reg!("RX8CNTRH", 0x30, ReadOnly, 0x00, "ProxSense channel 8 counter high"),
    reg!("RX8CNTRL", 0x31, ReadOnly, 0x00, "ProxSense channel 8 counter low"),
    reg!("RX9CNTRH", 0x32, ReadOnly, 0x00, "ProxSense channel 9 counter high"),
    reg!("RX9CNTRL", 0x33, ReadOnly, 0x00, "ProxSense channel 9 counter low"),
    reg!(
        "RX0CSSELR",
        0x40,
        ReadWrite,
        0x00,
        "ProxSense channel 0 sampling capacitor",
        &[bits!("RX0CSSEL", 0, 5), res!(5, 3)]
    ),
    reg!(
        "RX1CSSELR",
        0x41,
        ReadWrite,
        0x00,
        "ProxSense channel 1 sampling capacitor",
        &[bits!("RX1CSSEL", 0, 5), res!(5, 3)]
    ),
    reg!(
        "RX2CSSELR",
        0x42,
        ReadWrite,
        0x00,
        "ProxSense channel 2 sampling capacitor",
        &[bits!("RX2CSSEL", 0, 5), res!(5, 3)]
    ),
    reg!(
        "RX3CSSELR",
        0x43,
        ReadWrite,
        0x00,
        "ProxSense channel 3 sampling capacitor",
        &[bits!("RX3CSSEL", 0, 5), res!(5, 3)]
    ),
    reg!(
        "RX4CSSELR",
        0x44,
        ReadWrite,
        0x00,
        "ProxSense channel 4 sampling capacitor",
        &[bits!("RX4CSSEL", 0, 5), res!(5, 3)]
    ),
    reg!(
        "RX5CSSELR",
        0x45,
        ReadWrite,
        0x00,
        "ProxSense channel 5 sampling capacitor",
        &[bits!("RX5CSSEL", 0, 5), res!(5, 3)]
    ),
    reg!(
        "RX6CSSELR",
        0x46,
        ReadWrite,
        0x00,
        "ProxSense channel 6 sampling capacitor",
        &[bits!("RX6CSSEL", 0, 5), res!(5, 3)]
    ),
    reg!(
        "RX7CSSELR",
        0x47,
        ReadWrite,
        0x00,
        "ProxSense channel 7 sampling capacitor",
        &[bits!("RX7CSSEL", 0, 5), res!(5, 3)]
    ),
    reg!(
        "RX8CSSELR",
        0x48,
        ReadWrite,
        0x00,
        "ProxSense channel 8 sampling capacitor",
        &[bits!("RX8CSSEL", 0, 5), res!(5, 3)]
    ),
    reg!(
        "RX9CSSELR",
        0x49,
        ReadWrite,
        0x00,
        "ProxSense channel 9 sampling capacitor",
        &[bits!("RX9CSSEL", 0, 5), res!(5, 3)]
    ),
    reg!(
        "RX0EPCCSELR",
        0x50,
        NoBitAccess,
        0x00,
        "ProxSense channel 0 compensation capacitor"
    ),
    reg!(
        "RX1EPCCSELR",
        0x51,
        NoBitAccess,
        0x00,
        "ProxSense channel 1 compensation capacitor"
    ),
    reg!(
        "RX2EPCCSELR",
        0x52,
        NoBitAccess,
        0x00,
        "ProxSense channel 2 compensation capacitor"
    ),
    reg!(
        "RX3EPCCSELR",
        0x53,
        NoBitAccess,
        0x00,
        "ProxSense channel 3 compensation capacitor"
    ),
    reg!(
        "RX4EPCCSELR",
        0x54,
        NoBitAccess,
        0x00,
        "ProxSense channel 4 compensation capacitor"
    ),
    reg!(
        "RX5EPCCSELR",
        0x55,
        NoBitAccess,
        0x00,
        "ProxSense channel 5 compensation capacitor"
    ),
    reg!(
        "RX6EPCCSELR",
        0x56,
        NoBitAccess,
        0x00,
        "ProxSense channel 6 compensation capacitor"
    ),
    reg!(
        "RX7EPCCSELR",
        0x57,
        NoBitAccess,
        0x00,
        "ProxSense channel 7 compensation capacitor"
    ),
    reg!(
        "RX8EPCCSELR",
        0x58,
        NoBitAccess,
        0x00,
        "ProxSense channel 8 compensation capacitor"
    ),
    reg!(
        "RX9EPCCSELR",
        0x59,
        NoBitAccess,
        0x00,
        "ProxSense channel 9 compensation capacitor"
    ),
];

static PXS_PAIRS: &[WordPair] = &[
    pair!("MAXR", "MAXRH", "MAXRL"),
    pair!("RX0CNTR", "RX0CNTRH", "RX0CNTRL"),
    pair!("RX1CNTR", "RX1CNTRH", "RX1CNTRL"),
    pair!("RX2CNTR", "RX2CNTRH", "RX2CNTRL"),
    pair!("RX3CNTR", "RX3CNTRH", "RX3CNTRL"),
    pair!("RX4CNTR", "RX4CNTRH", "RX4CNTRL"),
    pair!("RX5CNTR", "RX5CNTRH", "RX5CNTRL"),
    pair!("RX6CNTR", "RX6CNTRH", "RX6CNTRL"),
    pair!("RX7CNTR", "RX7CNTRH", "RX7CNTRL"),
    pair!("RX8CNTR", "RX8CNTRH", "RX8CNTRL"),
    pair!("RX9CNTR", "RX9CNTRH", "RX9CNTRL"),
];

pub(crate) fn layout(kind: Tl5xKind) -> RegisterLayout {
    use Tl5xKind::*;
    match kind {
        PortA | PortB | PortD => common::gpio(),
        Syscfg => RegisterLayout::new("SYSCFG", SYSCFG, &[], &[]),
        Rst => RegisterLayout::new("RST", RST, &[], RST_KEYS),
        Clk => RegisterLayout::new("CLK", CLK, &[], &[]),
        Wfe => RegisterLayout::new("WFE", WFE, &[], &[]),
        Itc => RegisterLayout::new("ITC", ITC, &[], &[]),
        Pxs => RegisterLayout::new("PXS", PXS, PXS_PAIRS, &[]),
        Wwdg => common::wwdg(),
        Iwdg => common::iwdg(),
        Awu => common::awu(),
        Beep => common::beep(),
        I2c => common::i2c_stm8l(),
        Cfg => common::cfg(),
        Flash => stm8l::layout(L10xKind::Flash),
        Exti => stm8l::layout(L10xKind::Exti),
        Spi => stm8l::layout(L10xKind::Spi),
        Usart => stm8l::layout(L10xKind::Usart),
        Tim2 => stm8l::layout(L10xKind::Tim2),
        Tim3 => stm8l::layout(L10xKind::Tim3),
        Tim4 => stm8l::layout(L10xKind::Tim4),
        Opt | Dm | Uid => RegisterLayout::address_only(kind.name()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pxs_map() {
        let pxs = layout(Tl5xKind::Pxs);
        assert_eq!(pxs.register("ISR").map(|r| r.offset), Some(0x04));
        assert_eq!(pxs.register("CKCR1").map(|r| r.reset_value), Some(0x30));
        assert_eq!(pxs.register("RX9CNTRL").map(|r| r.offset), Some(0x33));
        assert_eq!(pxs.register("RX0EPCCSELR").map(|r| r.offset), Some(0x50));
        assert_eq!(pxs.span(), 0x5A);
        assert_eq!(pxs.pairs.len(), 11);
    }

    #[test]
    fn test_shared_with_l10x() {
        assert_eq!(layout(Tl5xKind::Tim2), stm8l::layout(L10xKind::Tim2));
        assert_eq!(layout(Tl5xKind::Usart).peripheral, "USART");
        let clk = layout(Tl5xKind::Clk);
        assert!(clk.register("PCKENR").is_none());
        assert_eq!(clk.register("PCKENR2").map(|r| r.reset_value), Some(0x01));
        assert_eq!(layout(Tl5xKind::Wwdg).span(), 2);
    }
}
