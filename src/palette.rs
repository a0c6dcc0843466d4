// Label byte -> window color, via a 256-entry table built once.
// Visual: grayscale shows label value as brightness; colored mode makes
// neighbouring labels easy to tell apart.

pub struct Palette {
    colors: [u32; 256], // 0x00RRGGBB per label value
}

impl Palette {
    /// Brightness equals the label value.
    pub fn grayscale() -> Self {
        let mut colors = [0u32; 256];
        for (j, c) in colors.iter_mut().enumerate() {
            *c = pack(j as u8, j as u8, j as u8);
        }
        Self { colors }
    }

    /// Cycle pure red/green/blue by value; even labels stay gray, and every
    /// multiple of 7 gets a light blue so it stands out.
    pub fn colored() -> Self {
        let mut colors = [0u32; 256];
        for (j, c) in colors.iter_mut().enumerate() {
            let v = j as u8;
            *c = if j % 7 == 0 {
                pack(100, 200, 255)
            } else if j % 2 == 0 {
                pack(v, v, v)
            } else {
                match j % 3 {
                    0 => pack(255, 0, 0),
                    1 => pack(0, 255, 0),
                    _ => pack(0, 0, 255),
                }
            };
        }
        Self { colors }
    }

    pub fn new(colored: bool) -> Self {
        if colored { Self::colored() } else { Self::grayscale() }
    }

    #[inline]
    pub fn color(&self, label: u8) -> u32 {
        self.colors[label as usize]
    }
}

#[inline]
fn pack(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grayscale_is_identity_brightness() {
        let p = Palette::grayscale();
        assert_eq!(p.color(0), 0);
        assert_eq!(p.color(255), 0x00FF_FFFF);
        assert_eq!(p.color(5), 0x0005_0505);
    }

    #[test]
    fn colored_rules() {
        let p = Palette::colored();
        assert_eq!(p.color(0), 0x0064_C8FF); // multiple of 7
        assert_eq!(p.color(14), 0x0064_C8FF);
        assert_eq!(p.color(4), 0x0004_0404); // even
        assert_eq!(p.color(3), 0x00FF_0000); // odd, %3 == 0
        assert_eq!(p.color(1), 0x0000_FF00);
        assert_eq!(p.color(5), 0x0000_00FF);
    }
}
