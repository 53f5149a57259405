use ndarray::{ArrayView2, ArrayView3};

/// A decoded image: contiguous interleaved bytes in row-major order.
///
/// `channels` is 1 for grayscale and 3 for RGB. Decoders always hand out
/// RGB rasters; grayscale rasters only exist as detector working copies.
#[derive(Clone, Debug, PartialEq)]
pub struct Raster {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
}

impl Raster {
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * (channels as usize),
            "data length must equal width * height * channels"
        );
        Self {
            data,
            width,
            height,
            channels,
        }
    }

    pub fn from_rgb(image: image::RgbImage) -> Self {
        let (width, height) = image.dimensions();
        Self::new(image.into_raw(), width, height, 3)
    }

    pub fn from_gray(image: image::GrayImage) -> Self {
        let (width, height) = image.dimensions();
        Self::new(image.into_raw(), width, height, 1)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn is_gray(&self) -> bool {
        self.channels == 1
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(self.shape(), &self.data)
            .expect("Raster data length must match dimensions")
    }

    /// `(height, width)` view of a single-channel raster, `None` otherwise.
    pub fn as_gray_view(&self) -> Option<ArrayView2<'_, u8>> {
        if !self.is_gray() {
            return None;
        }
        ArrayView2::from_shape((self.height as usize, self.width as usize), &self.data).ok()
    }

    fn shape(&self) -> (usize, usize, usize) {
        (
            self.height as usize,
            self.width as usize,
            self.channels as usize,
        )
    }
}
