use crate::image::{Image, ImageSize};

impl<T, const C: usize> bincode::enc::Encode for Image<T, C>
where
    T: bincode::enc::Encode,
{
    fn encode<E: bincode::enc::Encoder>(
        &self,
        encoder: &mut E,
    ) -> Result<(), bincode::error::EncodeError> {
        bincode::Encode::encode(&self.width(), encoder)?;
        bincode::Encode::encode(&self.height(), encoder)?;
        bincode::Encode::encode(&C, encoder)?;
        bincode::Encode::encode(&self.as_slice(), encoder)?;
        Ok(())
    }
}

impl<T, const C: usize, Ctx> bincode::de::Decode<Ctx> for Image<T, C>
where
    T: bincode::de::Decode<Ctx>,
{
    fn decode<D: bincode::de::Decoder<Context = Ctx>>(
        decoder: &mut D,
    ) -> Result<Self, bincode::error::DecodeError> {
        let width: usize = bincode::Decode::decode(decoder)?;
        let height: usize = bincode::Decode::decode(decoder)?;
        let channels: usize = bincode::Decode::decode(decoder)?;
        if channels != C {
            return Err(bincode::error::DecodeError::OtherString(format!(
                "Stored image has {} channels, expected {}",
                channels, C
            )));
        }
        let data: Vec<T> = bincode::Decode::decode(decoder)?;
        Image::new(ImageSize { width, height }, data)
            .map_err(|e| bincode::error::DecodeError::OtherString(format!("Image error: {}", e)))
    }
}
