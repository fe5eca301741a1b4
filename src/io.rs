
//! Specialized binary input and output.
//! Uses the error handling for this crate.

pub use ::std::io::{Read, Write};
use lebe::prelude::*;
use crate::error::{Error, Result, UnitResult};


/// Generic trait that defines common binary operations such as reading and writing for this type.
pub trait Data: Sized + Default + Clone {

    /// Number of bytes this would consume in an envelope.
    const BYTE_SIZE: usize = ::std::mem::size_of::<Self>();

    /// Read a value of type `Self`.
    fn read(read: &mut impl Read) -> Result<Self>;

    /// Read as many values of type `Self` as fit into the specified slice.
    /// If the slice cannot be filled completely, returns `Error::Invalid`.
    fn read_slice(read: &mut impl Read, slice: &mut [Self]) -> UnitResult;

    /// Write this value to the writer.
    fn write(self, write: &mut impl Write) -> UnitResult;

    /// Write all values of that slice to the writer.
    fn write_slice(write: &mut impl Write, slice: &[Self]) -> UnitResult;

    /// Read as many values of type `Self` as specified with `data_size`.
    ///
    /// This method will not allocate more memory than `soft_max` at once.
    /// If `hard_max` is specified, it will never read any more than that.
    /// Returns `Error::Invalid` if reader does not contain the desired number of elements.
    #[inline]
    fn read_vec(read: &mut impl Read, data_size: usize, soft_max: usize, hard_max: Option<usize>) -> Result<Vec<Self>> {
        let mut vec = Vec::new();
        Self::read_into_vec(read, &mut vec, data_size, soft_max, hard_max)?;
        Ok(vec)
    }

    /// Read as many values of type `Self` as specified with `data_size` into the provided vector.
    ///
    /// This method will not allocate more memory than `soft_max` at once.
    /// If `hard_max` is specified, it will never read any more than that.
    /// Returns `Error::Invalid` if reader does not contain the desired number of elements.
    #[inline]
    fn read_into_vec(read: &mut impl Read, data: &mut Vec<Self>, data_size: usize, soft_max: usize, hard_max: Option<usize>) -> UnitResult {
        if let Some(max) = hard_max {
            if data_size > max {
                return Err(Error::invalid("content size"))
            }
        }

        let soft_max = hard_max.unwrap_or(soft_max).min(soft_max);
        let end = data.len() + data_size;

        // do not allocate more than $chunks memory at once
        // (most of the time, this loop will run only once)
        while data.len() < end {
            let chunk_start = data.len();
            let chunk_end = (chunk_start + soft_max).min(end);

            data.resize(chunk_end, Self::default());
            Self::read_slice(read, &mut data[chunk_start .. chunk_end])?;
        }

        Ok(())
    }
}


macro_rules! implement_data_for_primitive {
    ($kind: ident) => {
        impl Data for $kind {
            #[inline]
            fn read(read: &mut impl Read) -> Result<Self> {
                Ok(read.read_from_little_endian()?)
            }

            #[inline]
            fn write(self, write: &mut impl Write) -> UnitResult {
                write.write_as_little_endian(&self)?;
                Ok(())
            }

            #[inline]
            fn read_slice(read: &mut impl Read, slice: &mut [Self]) -> UnitResult {
                read.read_from_little_endian_into(slice)?;
                Ok(())
            }

            #[inline]
            fn write_slice(write: &mut impl Write, slice: &[Self]) -> UnitResult {
                write.write_as_little_endian(slice)?;
                Ok(())
            }
        }
    };
}

implement_data_for_primitive!(u8);
implement_data_for_primitive!(u16);
implement_data_for_primitive!(u32);
implement_data_for_primitive!(u64);


#[cfg(test)]
mod test {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn round_trip_primitives(){
        let mut bytes = Cursor::new(Vec::new());

        258_u16.write(&mut bytes).unwrap();
        1_000_000_007_u64.write(&mut bytes).unwrap();
        7_u8.write(&mut bytes).unwrap();

        bytes.set_position(0);
        assert_eq!(u16::read(&mut bytes).unwrap(), 258);
        assert_eq!(u64::read(&mut bytes).unwrap(), 1_000_000_007);
        assert_eq!(u8::read(&mut bytes).unwrap(), 7);
    }

    #[test]
    fn read_vec_respects_hard_max(){
        let bytes = [0_u8; 64];
        let result = u8::read_vec(&mut bytes.as_slice(), 64, 16, Some(32));
        assert!(result.is_err());
    }

    #[test]
    fn read_vec_detects_missing_bytes(){
        let bytes = [0_u8; 8];
        let result = u8::read_vec(&mut bytes.as_slice(), 16, 1024, None);
        assert!(matches!(result, Err(Error::Invalid(_))));
    }

    #[test]
    fn read_vec_chunked_allocation(){
        let bytes = [3_u8; 100];
        let values = u8::read_vec(&mut bytes.as_slice(), 100, 7, None).unwrap();
        assert_eq!(values, vec![3_u8; 100]);
    }
}
