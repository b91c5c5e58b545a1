//! Fixed-buffer label formatting for compact UI surfaces.

use core::str;

/// `"{position}/{total}"` written into `out`, truncated when it does not fit.
pub fn progress_label(position: usize, total: usize, out: &mut [u8]) -> &str {
    let mut len = write_usize_ascii(position, out);
    if len + 1 >= out.len() {
        return str::from_utf8(&out[..len]).unwrap_or("");
    }
    out[len] = b'/';
    len += 1;
    len += write_usize_ascii(total, &mut out[len..]);

    str::from_utf8(&out[..len]).unwrap_or("")
}

pub fn write_usize_ascii(mut value: usize, out: &mut [u8]) -> usize {
    if out.is_empty() {
        return 0;
    }

    if value == 0 {
        out[0] = b'0';
        return 1;
    }

    let mut tmp = [0u8; 20];
    let mut n = 0usize;
    while value > 0 && n < tmp.len() {
        tmp[n] = b'0' + (value % 10) as u8;
        value /= 10;
        n += 1;
    }

    let len = n.min(out.len());
    for i in 0..len {
        out[i] = tmp[n - 1 - i];
    }
    len
}
