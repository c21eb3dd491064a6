use std::io;

/// Writes a hex dump of the given data. The `initial_offset` is what the
/// first byte of the data should be considered as, for printing of offsets.
pub fn hex_dump_to<W: io::Write>(
    mut output: W,
    data: &[u8],
    initial_offset: usize,
) -> io::Result<()> {
    // We want to print out an output like this:
    //       00 01 02 03 04 05 06 07 08 09 0A 0B 0C 0D 0E 0F
    //       -----------------------------------------------
    // 0000: 01 23 45 67 89 AB CD EF 01 23 45 67 89 AB CD EF .#Eg.....#Eg....
    if data.is_empty() {
        return Ok(());
    }

    let max_offset = initial_offset + data.len() - 1;
    let num_offset_hex_chars = std::cmp::max(4, format!("{max_offset:X}").len());
    let offset_padding = " ".repeat(num_offset_hex_chars);

    writeln!(
        output,
        "{offset_padding}  00 01 02 03 04 05 06 07 08 09 0A 0B 0C 0D 0E 0F"
    )?;
    writeln!(
        output,
        "{offset_padding}  -----------------------------------------------"
    )?;

    let mut remaining_data = data;
    let mut curr_offset = initial_offset;
    while !remaining_data.is_empty() {
        // The column of the first byte shown in the current line
        let line_start = curr_offset % 16;
        let line_length = std::cmp::min(remaining_data.len(), 16 - line_start);
        let line_end = line_start + line_length;
        let (line, rest) = remaining_data.split_at(line_length);

        let line_hex: String = line.iter().map(|b| format!("{b:02X} ")).collect();
        let line_ascii: String = line
            .iter()
            .map(|&b| {
                if b.is_ascii_graphic() || b == b' ' {
                    char::from(b)
                } else {
                    '.'
                }
            })
            .collect();

        writeln!(
            output,
            "{:0width$X}: {}{}{} {}{}",
            curr_offset - line_start,
            "   ".repeat(line_start),
            line_hex,
            "   ".repeat(16 - line_end),
            " ".repeat(line_start),
            line_ascii,
            width = num_offset_hex_chars,
        )?;

        remaining_data = rest;
        curr_offset += line_length;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dump(data: &[u8], initial_offset: usize) -> String {
        let mut out = Vec::new();
        hex_dump_to(&mut out, data, initial_offset).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn empty_data_prints_nothing() {
        assert_eq!(dump(&[], 0), "");
    }

    #[test]
    fn dumps_one_line() {
        let text = dump(b"PICT", 0);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[2].starts_with("0000: 50 49 43 54 "));
        assert!(lines[2].ends_with("PICT"));
    }

    #[test]
    fn unaligned_offset_starts_mid_line() {
        let data: Vec<u8> = (0..20).collect();
        let text = dump(&data, 0x104);
        let lines: Vec<&str> = text.lines().collect();
        // 12 bytes on the first row, 8 on the second.
        assert_eq!(lines.len(), 4);
        assert!(lines[2].starts_with("0100:             00 01 02"));
        assert!(lines[3].starts_with("0110: 0C 0D"));
    }
}
