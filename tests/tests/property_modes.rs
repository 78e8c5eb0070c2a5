//! Property-based tests for the mode adapters

use blockmode_algorithms::block::modes::cfb::{cfb1_encrypt, cfb1_encrypt_chunked};
use blockmode_algorithms::block::modes::ctr::increment_counter32;
use blockmode_algorithms::block::{BlockCipher, Sm4};
use blockmode_symmetric::{registry, CipherContext, CipherId, CipherStatus, CtrlCommand, Direction};
use proptest::prelude::*;

fn stream_round_trip(id: CipherId, key: &[u8; 16], iv: &[u8; 16], data: &[u8], split: usize) -> Vec<u8> {
    let split = split.min(data.len());

    let mut enc = CipherContext::new(registry::lookup(id));
    enc.init(Some(&key[..]), Some(&iv[..]), Direction::Encrypt).unwrap();
    let mut ct = vec![0u8; data.len()];
    assert_eq!(enc.update(&mut ct[..split], &data[..split]), CipherStatus::Success);
    assert_eq!(enc.update(&mut ct[split..], &data[split..]), CipherStatus::Success);

    let mut dec = CipherContext::new(registry::lookup(id));
    dec.init(Some(&key[..]), Some(&iv[..]), Direction::Decrypt).unwrap();
    let mut pt = vec![0u8; ct.len()];
    assert_eq!(dec.update(&mut pt, &ct), CipherStatus::Success);
    pt
}

proptest! {
    #[test]
    fn ctr_round_trip(
        key in any::<[u8; 16]>(),
        iv in any::<[u8; 16]>(),
        data in prop::collection::vec(any::<u8>(), 0..200),
        split in 0usize..200,
    ) {
        prop_assert_eq!(stream_round_trip(CipherId::Sm4Ctr, &key, &iv, &data, split), data);
    }

    #[test]
    fn cfb8_round_trip(
        key in any::<[u8; 16]>(),
        iv in any::<[u8; 16]>(),
        data in prop::collection::vec(any::<u8>(), 0..120),
        split in 0usize..120,
    ) {
        prop_assert_eq!(stream_round_trip(CipherId::Sm4Cfb8, &key, &iv, &data, split), data);
    }

    #[test]
    fn cfb1_round_trip(
        key in any::<[u8; 16]>(),
        iv in any::<[u8; 16]>(),
        data in prop::collection::vec(any::<u8>(), 0..40),
        split in 0usize..40,
    ) {
        prop_assert_eq!(stream_round_trip(CipherId::Sm4Cfb1, &key, &iv, &data, split), data);
    }

    #[test]
    fn cfb1_chunk_limit_is_invisible(
        key in any::<[u8; 16]>(),
        iv in any::<[u8; 16]>(),
        data in prop::collection::vec(any::<u8>(), 1..48),
        limit in 1usize..20,
    ) {
        let cipher = Sm4::set_encrypt_key(&key).unwrap();
        let mut reg_a = iv;
        let mut whole = vec![0u8; data.len()];
        cfb1_encrypt(&cipher, &mut reg_a, &data, &mut whole, Direction::Encrypt).unwrap();

        let mut reg_b = iv;
        let mut chunked = vec![0u8; data.len()];
        cfb1_encrypt_chunked(&cipher, &mut reg_b, &data, &mut chunked, Direction::Encrypt, limit).unwrap();

        prop_assert_eq!(whole, chunked);
        prop_assert_eq!(reg_a, reg_b);
    }

    #[test]
    fn counter_increment_keeps_upper_96_bits(counter in any::<[u8; 16]>()) {
        let mut next = counter;
        increment_counter32(&mut next);
        prop_assert_eq!(&next[..12], &counter[..12]);
        let low = u32::from_be_bytes([counter[12], counter[13], counter[14], counter[15]]);
        prop_assert_eq!(&next[12..], &low.wrapping_add(1).to_be_bytes()[..]);
    }

    #[test]
    fn wrap_round_trip_and_tamper(
        kek in any::<[u8; 16]>(),
        semiblocks in 2usize..8,
        seed in any::<u8>(),
        flip in any::<prop::sample::Index>(),
    ) {
        let data: Vec<u8> = (0..semiblocks * 8).map(|i| seed.wrapping_add(i as u8)).collect();

        let mut enc = CipherContext::new(registry::lookup(CipherId::Sm4Wrap));
        enc.init(Some(&kek[..]), None, Direction::Encrypt).unwrap();
        prop_assert_eq!(enc.cipher(None, Some(&data[..]), data.len()), CipherStatus::Length(data.len() + 8));
        let mut wrapped = vec![0u8; data.len() + 8];
        prop_assert_eq!(enc.update(&mut wrapped, &data), CipherStatus::Length(data.len() + 8));

        let mut dec = CipherContext::new(registry::lookup(CipherId::Sm4Wrap));
        dec.init(Some(&kek[..]), None, Direction::Decrypt).unwrap();
        let mut out = vec![0u8; data.len()];
        prop_assert_eq!(dec.update(&mut out, &wrapped), CipherStatus::Length(data.len()));
        prop_assert_eq!(&out, &data);

        let bit = flip.index(wrapped.len() * 8);
        wrapped[bit / 8] ^= 1 << (bit % 8);
        prop_assert_eq!(dec.update(&mut out, &wrapped), CipherStatus::Failure);
    }

    #[test]
    fn gcm_round_trip_and_tamper(
        key in any::<[u8; 16]>(),
        iv in any::<[u8; 12]>(),
        aad in prop::collection::vec(any::<u8>(), 0..40),
        data in prop::collection::vec(any::<u8>(), 0..80),
        flip in any::<prop::sample::Index>(),
    ) {
        let desc = registry::lookup(CipherId::Sm4Gcm);

        let mut enc = CipherContext::new(desc);
        enc.init(Some(&key[..]), Some(&iv[..]), Direction::Encrypt).unwrap();
        enc.cipher(None, Some(&aad[..]), aad.len());
        let mut ct = vec![0u8; data.len()];
        prop_assert_eq!(enc.update(&mut ct, &data), CipherStatus::Length(data.len()));
        prop_assert_eq!(enc.cipher(None, None, 0), CipherStatus::Length(0));
        let mut tag = [0u8; 16];
        enc.ctrl(CtrlCommand::GetTag(&mut tag)).unwrap();

        let open = |aad: &[u8], ct: &[u8]| {
            let mut dec = CipherContext::new(desc);
            dec.init(Some(&key[..]), Some(&iv[..]), Direction::Decrypt).unwrap();
            dec.ctrl(CtrlCommand::SetTag(&tag)).unwrap();
            dec.cipher(None, Some(aad), aad.len());
            let mut pt = vec![0u8; ct.len()];
            dec.update(&mut pt, ct);
            (dec.cipher(None, None, 0), pt)
        };

        let (status, pt) = open(&aad, &ct);
        prop_assert_eq!(status, CipherStatus::Length(0));
        prop_assert_eq!(&pt, &data);

        let mut message = aad.clone();
        message.extend_from_slice(&ct);
        if !message.is_empty() {
            let bit = flip.index(message.len() * 8);
            message[bit / 8] ^= 1 << (bit % 8);
            let (tampered_aad, tampered_ct) = message.split_at(aad.len());
            prop_assert_eq!(open(tampered_aad, tampered_ct).0, CipherStatus::Failure);
        }
    }
}
