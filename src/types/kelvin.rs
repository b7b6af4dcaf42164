//! Correlated color temperature lookup.

/// Lowest temperature the lookup table covers; anything warmer is clamped.
pub const KELVIN_MIN: u32 = 1000;

/// Highest temperature the lookup table covers; anything cooler is clamped.
pub const KELVIN_MAX: u32 = 12000;

/// Black-body (10° observer) sRGB breakpoints, ascending by temperature.
static KELVIN_TABLE: [(u32, [u8; 3]); 111] = [
    (1000, [255, 56, 0]),
    (1100, [255, 71, 0]),
    (1200, [255, 83, 0]),
    (1300, [255, 93, 0]),
    (1400, [255, 101, 0]),
    (1500, [255, 109, 0]),
    (1600, [255, 115, 0]),
    (1700, [255, 121, 0]),
    (1800, [255, 126, 0]),
    (1900, [255, 131, 0]),
    (2000, [255, 138, 18]),
    (2100, [255, 142, 33]),
    (2200, [255, 147, 44]),
    (2300, [255, 152, 54]),
    (2400, [255, 157, 63]),
    (2500, [255, 161, 72]),
    (2600, [255, 165, 79]),
    (2700, [255, 169, 87]),
    (2800, [255, 173, 94]),
    (2900, [255, 177, 101]),
    (3000, [255, 180, 107]),
    (3100, [255, 184, 114]),
    (3200, [255, 187, 120]),
    (3300, [255, 190, 126]),
    (3400, [255, 193, 132]),
    (3500, [255, 196, 137]),
    (3600, [255, 199, 143]),
    (3700, [255, 201, 148]),
    (3800, [255, 204, 153]),
    (3900, [255, 206, 159]),
    (4000, [255, 209, 163]),
    (4100, [255, 211, 168]),
    (4200, [255, 213, 173]),
    (4300, [255, 215, 177]),
    (4400, [255, 217, 182]),
    (4500, [255, 219, 186]),
    (4600, [255, 221, 190]),
    (4700, [255, 223, 194]),
    (4800, [255, 225, 198]),
    (4900, [255, 227, 202]),
    (5000, [255, 228, 206]),
    (5100, [255, 230, 210]),
    (5200, [255, 232, 213]),
    (5300, [255, 233, 217]),
    (5400, [255, 235, 220]),
    (5500, [255, 236, 224]),
    (5600, [255, 238, 227]),
    (5700, [255, 239, 230]),
    (5800, [255, 240, 233]),
    (5900, [255, 242, 236]),
    (6000, [255, 243, 239]),
    (6100, [255, 244, 242]),
    (6200, [255, 245, 244]),
    (6300, [255, 246, 247]),
    (6400, [255, 248, 251]),
    (6500, [255, 249, 253]),
    (6600, [254, 249, 255]),
    (6700, [252, 247, 255]),
    (6800, [249, 246, 255]),
    (6900, [247, 245, 255]),
    (7000, [245, 243, 255]),
    (7100, [243, 242, 255]),
    (7200, [240, 241, 255]),
    (7300, [239, 240, 255]),
    (7400, [237, 239, 255]),
    (7500, [235, 238, 255]),
    (7600, [233, 237, 255]),
    (7700, [231, 236, 255]),
    (7800, [230, 235, 255]),
    (7900, [228, 234, 255]),
    (8000, [227, 233, 255]),
    (8100, [225, 232, 255]),
    (8200, [224, 231, 255]),
    (8300, [222, 230, 255]),
    (8400, [221, 230, 255]),
    (8500, [220, 229, 255]),
    (8600, [218, 228, 255]),
    (8700, [217, 227, 255]),
    (8800, [216, 227, 255]),
    (8900, [215, 226, 255]),
    (9000, [214, 225, 255]),
    (9100, [213, 224, 255]),
    (9200, [213, 224, 255]),
    (9300, [212, 223, 255]),
    (9400, [211, 223, 255]),
    (9500, [211, 222, 255]),
    (9600, [210, 222, 255]),
    (9700, [210, 221, 255]),
    (9800, [209, 221, 255]),
    (9900, [208, 220, 255]),
    (10000, [208, 220, 255]),
    (10100, [207, 219, 255]),
    (10200, [206, 219, 255]),
    (10300, [206, 218, 255]),
    (10400, [205, 218, 255]),
    (10500, [204, 217, 255]),
    (10600, [204, 216, 255]),
    (10700, [203, 216, 255]),
    (10800, [203, 215, 255]),
    (10900, [202, 215, 255]),
    (11000, [201, 214, 255]),
    (11100, [201, 214, 255]),
    (11200, [200, 213, 255]),
    (11300, [199, 213, 255]),
    (11400, [199, 212, 255]),
    (11500, [198, 212, 255]),
    (11600, [198, 211, 255]),
    (11700, [197, 211, 255]),
    (11800, [196, 210, 255]),
    (11900, [196, 210, 255]),
    (12000, [195, 209, 255]),
];

/// Clamp `kelvin` into the supported range.
pub(crate) fn clamp_kelvin(kelvin: i64) -> u32 {
    kelvin.clamp(i64::from(KELVIN_MIN), i64::from(KELVIN_MAX)) as u32
}

/// Look up the 8-bit RGB triplet for a temperature already clamped into
/// `KELVIN_MIN..=KELVIN_MAX`.
///
/// Between two breakpoints each channel is the floored share of the
/// warmer neighbour plus the ceiled share of the cooler one.
pub(crate) fn kelvin_to_rgb(kelvin: u32) -> [u8; 3] {
    let mut values = [0u8; 3];

    for (i, &(temp, rgb)) in KELVIN_TABLE.iter().enumerate() {
        if kelvin > temp {
            continue;
        }
        if kelvin == temp || i == 0 {
            values = rgb;
            break;
        }

        let (prev_temp, prev_rgb) = KELVIN_TABLE[i - 1];
        let fac = (f64::from(kelvin) - f64::from(temp)) / (f64::from(prev_temp) - f64::from(temp));

        for c in 0..3 {
            let warm = (f64::from(prev_rgb[c]) * fac).floor();
            let cool = (f64::from(rgb[c]) * (1.0 - fac)).ceil();
            values[c] = (warm + cool).clamp(0.0, 255.0) as u8;
        }
        break;
    }

    values
}
