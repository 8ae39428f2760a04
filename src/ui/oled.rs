//! SSD1306 OLED behind the [`Panel`] trait.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306;

use crate::config::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use crate::ui::render::Panel;

type Driver<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

/// Buffered SSD1306 panel. Draw errors are swallowed - a failed I²C
/// transfer costs one stale frame, and the next commit repaints anyway.
pub struct Oled<I2C> {
    driver: Driver<I2C>,
}

impl<I2C> Oled<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    /// Initialise the SSD1306 and clear the screen.
    pub fn init(i2c: I2C) -> Self {
        let interface = I2CDisplayInterface::new(i2c);
        let mut driver = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();
        let _ = driver.init();
        driver.clear_buffer();
        let _ = driver.flush();
        Oled { driver }
    }
}

impl<I2C> DrawTarget for Oled<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let _ = self.driver.draw_iter(pixels);
        Ok(())
    }

    fn clear(&mut self, _color: Self::Color) -> Result<(), Self::Error> {
        self.driver.clear_buffer();
        Ok(())
    }
}

impl<I2C> OriginDimensions for Oled<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    fn size(&self) -> Size {
        Size::new(DISPLAY_WIDTH, DISPLAY_HEIGHT)
    }
}

impl<I2C> Panel for Oled<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    fn commit(&mut self) {
        let _ = self.driver.flush();
    }
}
