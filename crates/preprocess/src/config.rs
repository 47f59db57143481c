/// Spatial size expected by MobileNetV2 224 models
pub const DEFAULT_INPUT_SIZE: (u32, u32) = (224, 224);

pub const RGB_CHANNELS: usize = 3;
