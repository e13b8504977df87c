//! Size-bounded line framing for the command stream.

use cardspace_ipc::MAX_MESSAGE_SIZE;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};

/// One unit read from the command stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// A complete line, newline included when present.
    Line(Vec<u8>),
    /// A line longer than [`MAX_MESSAGE_SIZE`]. Its bytes were discarded.
    TooLong(usize),
    /// End of input.
    Eof,
}

/// Read the next line without buffering more than [`MAX_MESSAGE_SIZE`] bytes.
pub async fn read_frame<R>(reader: &mut R) -> std::io::Result<Frame>
where
    R: AsyncBufRead + Unpin,
{
    let limit = MAX_MESSAGE_SIZE as u64;
    let mut buf = Vec::new();
    let n = (&mut *reader).take(limit).read_until(b'\n', &mut buf).await?;
    if n == 0 {
        return Ok(Frame::Eof);
    }
    if buf.last() == Some(&b'\n') || n < MAX_MESSAGE_SIZE {
        return Ok(Frame::Line(buf));
    }

    // Skip the remainder of the oversized line.
    let mut size = n;
    loop {
        let mut rest = Vec::new();
        let m = (&mut *reader).take(limit).read_until(b'\n', &mut rest).await?;
        size += m;
        if m == 0 || rest.last() == Some(&b'\n') {
            break;
        }
    }
    Ok(Frame::TooLong(size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::BufReader;

    #[tokio::test]
    async fn test_reads_lines_in_order() {
        let mut reader = BufReader::new(&b"{\"type\":\"stop\"}\nsecond"[..]);
        assert_eq!(
            read_frame(&mut reader).await.unwrap(),
            Frame::Line(b"{\"type\":\"stop\"}\n".to_vec())
        );
        assert_eq!(
            read_frame(&mut reader).await.unwrap(),
            Frame::Line(b"second".to_vec())
        );
        assert_eq!(read_frame(&mut reader).await.unwrap(), Frame::Eof);
    }

    #[tokio::test]
    async fn test_oversized_line_is_skipped() {
        let mut input = vec![b'x'; MAX_MESSAGE_SIZE * 2 + 10];
        input.push(b'\n');
        input.extend_from_slice(b"after\n");
        let mut reader = BufReader::new(&input[..]);

        assert_eq!(
            read_frame(&mut reader).await.unwrap(),
            Frame::TooLong(MAX_MESSAGE_SIZE * 2 + 11)
        );
        assert_eq!(
            read_frame(&mut reader).await.unwrap(),
            Frame::Line(b"after\n".to_vec())
        );
    }
}
